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
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// The memory phase of a card.
///
/// `New` is strictly a starting condition: grading a card always moves it
/// out of `New`, and no grading call ever returns it. `Review` is the only
/// steady state; lapsed cards oscillate through `Relearning` and back.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CardState {
    New,
    Learning,
    Review,
    Relearning,
}

impl CardState {
    pub fn as_str(&self) -> &str {
        match self {
            CardState::New => "new",
            CardState::Learning => "learning",
            CardState::Review => "review",
            CardState::Relearning => "relearning",
        }
    }
}

impl TryFrom<String> for CardState {
    type Error = ErrorReport;

    /// Fails closed: a state string outside the four known phases is an
    /// invariant violation by the storage layer, not something to coerce.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(CardState::New),
            "learning" => Ok(CardState::Learning),
            "review" => Ok(CardState::Review),
            "relearning" => Ok(CardState::Relearning),
            _ => fail(format!("unknown card state: {value}")),
        }
    }
}

impl From<CardState> for String {
    fn from(state: CardState) -> String {
        state.as_str().to_string()
    }
}

/// The scheduling snapshot of a single flashcard.
///
/// This is the engine's input payload; the surrounding application owns
/// identity, content and persistence. Which fields are meaningful depends
/// on `state`: `interval_days` and `ease` drive `Review`/`Relearning`
/// scheduling, `learning_step_index` indexes the learning steps while in
/// `Learning` and the relearning steps while in `Relearning`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub state: CardState,
    pub due_at: Timestamp,
    pub interval_days: f64,
    pub ease: f64,
    pub learning_step_index: usize,
    /// Count of non-Again grades ever applied.
    pub reps: usize,
    /// Count of Review cards forgotten (rated Again).
    pub lapses: usize,
}

impl Card {
    /// A brand-new card, due immediately.
    pub fn new(created_at: Timestamp, starting_ease: f64) -> Self {
        Card {
            state: CardState::New,
            due_at: created_at,
            interval_days: 0.0,
            ease: starting_ease,
            learning_step_index: 0,
            reps: 0,
            lapses: 0,
        }
    }
}
