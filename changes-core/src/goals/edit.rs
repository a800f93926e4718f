//! Edits that transform the goals model.
//!
//! Edits are plain values announced on streams. The model applies them one
//! at a time with [`Edit::transform`], so the current model is always the
//! fold of every edit announced so far over the initial goals.

use crate::changes::Either;

use super::goal::{merge_activity, Goal, GoalProgress, Goals};

/// Every change to goals except advancing progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalEdit {
    /// Insert a new, inactive goal at the top, unless it is already present.
    Add(Goal),
    Delete(Goal),
    /// Replace the goal's attributes, keeping its progress.
    Update(Goal),
    /// Activate or deactivate goals by position.
    SetActivity(Vec<bool>),
}

impl GoalEdit {
    pub fn transform(&self, goals: &Goals) -> Goals {
        match self {
            GoalEdit::Add(goal) => {
                if goals.contains(goal.id()) {
                    return goals.clone();
                }
                let mut next = goals.clone();
                next.insert_front(GoalProgress::new(goal.clone(), None));
                next
            }
            GoalEdit::Delete(goal) => {
                let mut next = goals.clone();
                next.remove(goal.id());
                next
            }
            GoalEdit::Update(goal) => {
                let mut next = goals.clone();
                if let Some(entry) = next.get_mut(goal.id()) {
                    entry.goal = goal.clone();
                }
                next
            }
            GoalEdit::SetActivity(activity) => merge_activity(goals, activity),
        }
    }
}

/// Changes that advance goal progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEdit {
    /// Count one more completion of an active goal.
    Bump(Goal),
}

impl ProgressEdit {
    pub fn transform(&self, goals: &Goals) -> Goals {
        match self {
            ProgressEdit::Bump(goal) => {
                let mut next = goals.clone();
                if let Some(entry) = next.get_mut(goal.id()) {
                    entry.progress = entry.progress.map(|count| count.saturating_add(1));
                }
                next
            }
        }
    }
}

/// Any model edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Goal(GoalEdit),
    Progress(ProgressEdit),
}

impl Edit {
    pub fn transform(&self, goals: &Goals) -> Goals {
        match self {
            Edit::Goal(edit) => edit.transform(goals),
            Edit::Progress(edit) => edit.transform(goals),
        }
    }
}

impl From<Either<GoalEdit, ProgressEdit>> for Edit {
    fn from(edit: Either<GoalEdit, ProgressEdit>) -> Self {
        edit.either(Edit::Goal, Edit::Progress)
    }
}

impl From<GoalEdit> for Edit {
    fn from(edit: GoalEdit) -> Self {
        Edit::Goal(edit)
    }
}

impl From<ProgressEdit> for Edit {
    fn from(edit: ProgressEdit) -> Self {
        Edit::Progress(edit)
    }
}
