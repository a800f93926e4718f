//! Goal records and the ordered goal collection.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a goal.
///
/// Identity of a goal is its id: edits that carry a goal address the entry
/// with the same id, whatever its other fields say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalId(u64);

impl GoalId {
    /// Generate a new unique goal ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

/// Colours a goal may be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalColour {
    Blue,
    Cyan,
    #[default]
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl GoalColour {
    pub const ALL: [GoalColour; 7] = [
        GoalColour::Blue,
        GoalColour::Cyan,
        GoalColour::Green,
        GoalColour::Yellow,
        GoalColour::Orange,
        GoalColour::Red,
        GoalColour::Purple,
    ];
}

/// The period over which a goal's frequency is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalInterval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for GoalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalInterval::Daily => "Daily",
            GoalInterval::Weekly => "Weekly",
            GoalInterval::Monthly => "Monthly",
        })
    }
}

/// Reasons a goal definition is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("a goal must be achieved at least once per interval")]
    ZeroFrequency,

    #[error("a goal needs a non-empty title")]
    EmptyTitle,
}

/// A single goal: what to do, how often, and how it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    id: GoalId,
    colour: GoalColour,
    title: String,
    interval: GoalInterval,
    /// How often the goal ought to be achieved during the interval.
    frequency: u32,
}

impl Goal {
    /// Create a goal with a fresh id.
    pub fn new(
        colour: GoalColour,
        title: impl Into<String>,
        interval: GoalInterval,
        frequency: u32,
    ) -> Result<Self, GoalError> {
        let title = title.into();
        validate_title(&title)?;
        validate_frequency(frequency)?;
        Ok(Self {
            id: GoalId::new(),
            colour,
            title,
            interval,
            frequency,
        })
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn colour(&self) -> GoalColour {
        self.colour
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn interval(&self) -> GoalInterval {
        self.interval
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn set_colour(&mut self, colour: GoalColour) {
        self.colour = colour;
    }

    pub fn set_interval(&mut self, interval: GoalInterval) {
        self.interval = interval;
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), GoalError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_frequency(&mut self, frequency: u32) -> Result<(), GoalError> {
        validate_frequency(frequency)?;
        self.frequency = frequency;
        Ok(())
    }

    /// Whether `other` is the same goal, possibly with different attributes.
    pub fn same_goal(&self, other: &Goal) -> bool {
        self.id == other.id
    }

    /// Human readable frequency, e.g. "3 times (Weekly)".
    pub fn frequency_per_interval(&self) -> String {
        format!("{} times ({})", self.frequency, self.interval)
    }

    /// Fraction of the goal achieved after `count` completions in the current
    /// interval. Values above 1.0 mean the goal was exceeded.
    pub fn percentage(&self, count: u32) -> f32 {
        count as f32 / self.frequency as f32
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            id: GoalId::new(),
            colour: GoalColour::Green,
            title: "New Goal".to_string(),
            interval: GoalInterval::Daily,
            frequency: 1,
        }
    }
}

fn validate_title(title: &str) -> Result<(), GoalError> {
    if title.trim().is_empty() {
        return Err(GoalError::EmptyTitle);
    }
    Ok(())
}

fn validate_frequency(frequency: u32) -> Result<(), GoalError> {
    if frequency == 0 {
        return Err(GoalError::ZeroFrequency);
    }
    Ok(())
}

/// A goal and its progress in the current interval.
///
/// Only active goals make progress; `progress` is `None` for inactive ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalProgress {
    pub goal: Goal,
    pub progress: Option<u32>,
}

impl GoalProgress {
    pub fn new(goal: Goal, progress: Option<u32>) -> Self {
        Self { goal, progress }
    }

    pub fn is_active(&self) -> bool {
        self.progress.is_some()
    }
}

/// The complete, immutable model state: goals with progress, in display
/// order.
#[derive(Debug, Clone, Default)]
pub struct Goals {
    entries: IndexMap<GoalId, GoalProgress>,
}

impl Goals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: GoalId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: GoalId) -> Option<&GoalProgress> {
        self.entries.get(&id)
    }

    /// The entry at display position `index`.
    pub fn get_index(&self, index: usize) -> Option<&GoalProgress> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GoalProgress> {
        self.entries.values()
    }

    /// For each goal in order, whether it is active.
    pub fn activity(&self) -> Vec<bool> {
        self.iter().map(GoalProgress::is_active).collect()
    }

    /// Only the active goals, in order.
    pub fn active(&self) -> Goals {
        self.iter().filter(|entry| entry.is_active()).cloned().collect()
    }

    pub(super) fn insert_front(&mut self, entry: GoalProgress) {
        self.entries.shift_insert(0, entry.goal.id(), entry);
    }

    pub(super) fn remove(&mut self, id: GoalId) -> Option<GoalProgress> {
        self.entries.shift_remove(&id)
    }

    pub(super) fn get_mut(&mut self, id: GoalId) -> Option<&mut GoalProgress> {
        self.entries.get_mut(&id)
    }

    pub(super) fn values_mut(&mut self) -> impl Iterator<Item = &mut GoalProgress> {
        self.entries.values_mut()
    }
}

/// Equality is order-sensitive: the order of goals is part of the model.
impl PartialEq for Goals {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Goals {}

impl FromIterator<GoalProgress> for Goals {
    /// Later entries with a duplicate id replace earlier ones in place.
    fn from_iter<I: IntoIterator<Item = GoalProgress>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|entry| (entry.goal.id(), entry))
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Goals {
    type Item = &'a GoalProgress;
    type IntoIter = indexmap::map::Values<'a, GoalId, GoalProgress>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Adjust the progress of `goals` to the activity flags, position by
/// position.
///
/// A goal that becomes active starts at zero progress; one that becomes
/// inactive loses its progress. Goals without a matching flag are left
/// unchanged and surplus flags are ignored.
pub fn merge_activity(goals: &Goals, activity: &[bool]) -> Goals {
    let mut merged = goals.clone();
    for (entry, &is_active) in merged.values_mut().zip(activity) {
        entry.progress = match (entry.progress, is_active) {
            (None, false) | (Some(_), true) => entry.progress,
            (None, true) => Some(0),
            (Some(_), false) => None,
        };
    }
    merged
}
