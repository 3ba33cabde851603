//! Difficulty settings published by the scenario through `_G.gameSettings`.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DIFFICULTY_LABEL, DEFAULT_ROUNDS, DEFAULT_SEQUENCE_SPEED_MS, DEFAULT_TIME_LIMIT_SECS,
    NOTICE_DIFFICULTY,
};
use crate::endpoint::ExecResponse;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultySettings {
    pub difficulty: String,
    pub time_limit: u32,
    pub rounds: u32,
    pub sequence_speed: u32,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            difficulty: String::from(DEFAULT_DIFFICULTY_LABEL),
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            rounds: DEFAULT_ROUNDS,
            sequence_speed: DEFAULT_SEQUENCE_SPEED_MS,
        }
    }
}

impl DifficultySettings {
    /// Read settings out of a console answer, falling back per field.
    #[must_use]
    pub fn from_response(response: &ExecResponse) -> Self {
        let defaults = Self::default();
        Self {
            difficulty: response
                .text("difficulty")
                .map_or(defaults.difficulty, str::to_string),
            time_limit: response
                .positive_u32("timeLimit")
                .unwrap_or(defaults.time_limit),
            rounds: response.positive_u32("rounds").unwrap_or(defaults.rounds),
            sequence_speed: response
                .positive_u32("sequenceSpeed")
                .unwrap_or(defaults.sequence_speed),
        }
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::neutral(NOTICE_DIFFICULTY)
            .with_arg("difficulty", &self.difficulty)
            .with_arg("rounds", self.rounds)
            .with_arg("time", self.time_limit)
    }
}
