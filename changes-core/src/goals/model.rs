//! The goals model store.
//!
//! [`GoalsModel`] builds the edit streams and the model accumulator once and
//! hands each collaborator only the capability it needs: data sources get
//! the model to observe, editors get an inlet for their kind of edit.
//!
//! ```text
//! goal_edits ─────┐
//!                 ├─ merge ─ map(Edit::from) ─ edits ─ accumulate ─ model
//! progress_edits ─┘
//! ```

use std::fmt;

use crate::changes::{Accumulator, Either, Inlet, Observable, Outlet, Stream};

use super::config::{ConfigError, ModelConfig};
use super::edit::{Edit, GoalEdit, ProgressEdit};
use super::goal::Goals;

/// Root of the goals stream graph.
pub struct GoalsModel {
    goal_edits: Stream<GoalEdit>,
    progress_edits: Stream<ProgressEdit>,
    edits: Stream<Edit>,
    model: Accumulator<Goals>,
}

impl GoalsModel {
    /// Build the stream graph starting from `initial`.
    pub fn new(initial: Goals) -> Self {
        let goal_edits: Stream<GoalEdit> = Stream::new();
        let progress_edits: Stream<ProgressEdit> = Stream::new();
        let edits = goal_edits
            .merge(&progress_edits)
            .map(|edit: &Either<GoalEdit, ProgressEdit>| Edit::from(edit.clone()));
        let model = edits.accumulate(initial, |edit: &Edit, goals: &Goals| {
            tracing::debug!(?edit, goals = goals.len(), "applying edit");
            edit.transform(goals)
        });

        Self {
            goal_edits,
            progress_edits,
            edits,
            model,
        }
    }

    /// Build the model from the seed goals in `config`.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ConfigError> {
        let initial = config.seed_goals()?;
        tracing::info!(goals = initial.len(), "goals model built from configuration");
        Ok(Self::new(initial))
    }

    /// Write access for goal edits (add, delete, update, activity).
    pub fn goal_edits(&self) -> Inlet<GoalEdit> {
        self.goal_edits.inlet()
    }

    /// Write access for progress edits.
    pub fn progress_edits(&self) -> Inlet<ProgressEdit> {
        self.progress_edits.inlet()
    }

    /// Read access to every edit, in the order the model applies them.
    pub fn edits(&self) -> Outlet<Edit> {
        self.edits.outlet()
    }

    /// The live model. Observers receive the current goals immediately and
    /// after every edit.
    pub fn model(&self) -> Accumulator<Goals> {
        self.model.clone()
    }

    /// Snapshot of the current goals.
    pub fn current(&self) -> Goals {
        self.model.current()
    }
}

impl fmt::Debug for GoalsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoalsModel")
            .field("goals", &self.model.with_current(Goals::len))
            .field("edit_observers", &self.edits.observer_count())
            .finish()
    }
}
