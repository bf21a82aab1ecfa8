// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// User-configurable scheduling parameters.
///
/// Settings are passed explicitly into every scheduling call; the engine
/// holds no ambient configuration. Values are accepted as-is: the engine
/// does not check that `minimum_interval_days <= maximum_interval_days` or
/// that the multipliers are sane, that is the configuration layer's job.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Step delays for cards in the learning phase, e.g. "1m 10m".
    pub learning_steps: String,
    /// Step delays for lapsed cards, e.g. "10m".
    pub relearning_steps: String,
    /// Interval granted on graduating out of learning with Good.
    pub graduating_interval_days: f64,
    /// Interval granted on graduating out of learning with Easy.
    pub easy_interval_days: f64,
    /// Ease assigned to a card on its first-ever grading.
    pub starting_ease: f64,
    /// Extra multiplier on Easy review intervals.
    pub easy_bonus: f64,
    /// Multiplier on Hard review intervals.
    pub hard_interval: f64,
    /// Global multiplier applied to all successful review intervals.
    pub interval_modifier: f64,
    /// Fraction of the prior interval retained when a review card lapses.
    pub new_interval_multiplier: f64,
    pub minimum_interval_days: f64,
    pub maximum_interval_days: f64,
    /// Delay before an Again card comes back within a session. Carried for
    /// the UI; the transition rules themselves never read it.
    pub again_delay_minutes: f64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        SchedulerSettings {
            learning_steps: "1m 10m".to_string(),
            relearning_steps: "10m".to_string(),
            graduating_interval_days: 1.0,
            easy_interval_days: 4.0,
            starting_ease: 2.5,
            easy_bonus: 1.3,
            hard_interval: 1.2,
            interval_modifier: 1.0,
            new_interval_multiplier: 0.0,
            minimum_interval_days: 1.0,
            maximum_interval_days: 36500.0,
            again_delay_minutes: 10.0,
        }
    }
}

impl SchedulerSettings {
    /// Parse settings from TOML. Missing fields fall back to the defaults,
    /// so a settings file only needs to name what it overrides.
    pub fn from_toml(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Default settings with the learning steps of a preset mode.
    pub fn for_mode(mode: LearningMode) -> Self {
        SchedulerSettings {
            learning_steps: mode.learning_steps().to_string(),
            ..SchedulerSettings::default()
        }
    }
}

/// Preset learning-step sequences, from a quick two-step ramp to a
/// week-long one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LearningMode {
    Fast,
    Normal,
    Deep,
}

impl LearningMode {
    pub fn learning_steps(self) -> &'static str {
        match self {
            LearningMode::Fast => "10m 1d",
            LearningMode::Normal => "10m 1d 3d",
            LearningMode::Deep => "10m 1d 3d 7d",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LearningMode::Fast => "fast",
            LearningMode::Normal => "normal",
            LearningMode::Deep => "deep",
        }
    }
}

impl TryFrom<String> for LearningMode {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "fast" => Ok(LearningMode::Fast),
            "normal" => Ok(LearningMode::Normal),
            "deep" => Ok(LearningMode::Deep),
            _ => fail(format!("unknown learning mode: {value}")),
        }
    }
}

impl From<LearningMode> for String {
    fn from(mode: LearningMode) -> String {
        mode.as_str().to_string()
    }
}
