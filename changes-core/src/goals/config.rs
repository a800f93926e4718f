//! Seed configuration for the goals model.
//!
//! The initial goals are read from JSON:
//!
//! ```json
//! {
//!   "goals": [
//!     { "title": "Yoga", "colour": "blue", "interval": "monthly", "frequency": 5, "progress": 3 }
//!   ]
//! }
//! ```
//!
//! `colour` defaults to green and `progress` to inactive when omitted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::goal::{Goal, GoalColour, GoalError, GoalInterval, GoalProgress, Goals};

/// Errors from loading or validating a [`ModelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read goals config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse goals config")]
    Parse(#[from] serde_json::Error),

    #[error("goal #{index} in config is invalid")]
    InvalidGoal {
        index: usize,
        #[source]
        source: GoalError,
    },
}

/// One goal as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoalSeed {
    pub title: String,
    #[serde(default)]
    pub colour: GoalColour,
    pub interval: GoalInterval,
    pub frequency: u32,
    /// `None` for a goal that is not active in the current interval.
    #[serde(default)]
    pub progress: Option<u32>,
}

impl GoalSeed {
    fn build(&self) -> Result<GoalProgress, GoalError> {
        let goal = Goal::new(self.colour, self.title.clone(), self.interval, self.frequency)?;
        Ok(GoalProgress::new(goal, self.progress))
    }
}

/// Configuration of the goals model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub goals: Vec<GoalSeed>,
}

impl ModelConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded goals config");
        Self::from_json_str(&json)
    }

    /// Build the initial model state, validating every seed.
    pub fn seed_goals(&self) -> Result<Goals, ConfigError> {
        self.goals
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                seed.build()
                    .map_err(|source| ConfigError::InvalidGoal { index, source })
            })
            .collect()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let seed = |title: &str, colour, interval, frequency, progress| GoalSeed {
            title: title.to_string(),
            colour,
            interval,
            frequency,
            progress: Some(progress),
        };
        Self {
            goals: vec![
                seed("Yoga", GoalColour::Blue, GoalInterval::Monthly, 5, 3),
                seed("Walks", GoalColour::Orange, GoalInterval::Weekly, 3, 0),
                seed("Stretching", GoalColour::Purple, GoalInterval::Daily, 3, 1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_goals_with_defaults() {
        let config = ModelConfig::from_json_str(
            r#"{ "goals": [
                { "title": "Swim", "interval": "weekly", "frequency": 2 },
                { "title": "Read", "colour": "red", "interval": "daily", "frequency": 1, "progress": 0 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(config.goals.len(), 2);
        assert_eq!(config.goals[0].colour, GoalColour::Green);
        assert_eq!(config.goals[0].progress, None);

        let goals = config.seed_goals().unwrap();
        assert_eq!(goals.activity(), vec![false, true]);
        assert_eq!(goals.get_index(1).map(|e| e.goal.colour()), Some(GoalColour::Red));
    }

    #[test]
    fn empty_object_is_empty_model() {
        let config = ModelConfig::from_json_str("{}").unwrap();
        assert!(config.seed_goals().unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ModelConfig::from_json_str("{ goals: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ModelConfig::from_json_str(
            r##"{ "goals": [ { "title": "x", "interval": "daily", "frequency": 1, "colour_hex": "#fff" } ] }"##,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reports_invalid_goal_index() {
        let config = ModelConfig::from_json_str(
            r#"{ "goals": [
                { "title": "ok", "interval": "daily", "frequency": 1 },
                { "title": "never", "interval": "daily", "frequency": 0 }
            ] }"#,
        )
        .unwrap();

        match config.seed_goals() {
            Err(ConfigError::InvalidGoal { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, GoalError::ZeroFrequency);
            }
            other => panic!("expected invalid goal, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ModelConfig::from_path("/nonexistent/goals.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn default_config_seeds_three_active_goals() {
        let goals = ModelConfig::default().seed_goals().unwrap();
        let titles: Vec<&str> = goals.iter().map(|e| e.goal.title()).collect();
        assert_eq!(titles, vec!["Yoga", "Walks", "Stretching"]);
        assert_eq!(goals.activity(), vec![true, true, true]);
    }
}
