//! Goals Model
//!
//! The domain layer built on the change-propagation primitives: goal
//! records, the edits that transform them, and the store that wires edit
//! streams into a live model.
//!
//! Collaborators never share global streams. A [`GoalsModel`] is constructed
//! once at the root of the application and its inlets, outlet and model
//! accumulator are passed to whoever needs them.

mod goal;
mod edit;
mod config;
mod model;

pub use goal::{merge_activity, Goal, GoalColour, GoalError, GoalId, GoalInterval, GoalProgress, Goals};
pub use edit::{Edit, GoalEdit, ProgressEdit};
pub use config::{ConfigError, GoalSeed, ModelConfig};
pub use model::GoalsModel;
