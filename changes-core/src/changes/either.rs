//! Two-case tagged union used by `merge`.

/// A value that came from either the left or the right source of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// The left value, if this is `Left`.
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// The right value, if this is `Right`.
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Collapse both cases into one value.
    pub fn either<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let left: Either<i32, &str> = Either::Left(1);
        let right: Either<i32, &str> = Either::Right("r");

        assert!(left.is_left());
        assert!(right.is_right());
        assert_eq!(left.left(), Some(1));
        assert_eq!(left.right(), None);
        assert_eq!(right.right(), Some("r"));
        assert_eq!(right.as_ref(), Either::Right(&"r"));
    }

    #[test]
    fn either_collapses() {
        let values: Vec<Either<u8, String>> = vec![Either::Left(3), Either::Right("abc".into())];
        let sizes: Vec<usize> = values
            .into_iter()
            .map(|v| v.either(usize::from, |s| s.len()))
            .collect();
        assert_eq!(sizes, vec![3, 3]);
    }
}
