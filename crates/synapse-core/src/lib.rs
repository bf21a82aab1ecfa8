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

//! synapse-core: Core scheduling library for the synapse spaced repetition
//! system.
//!
//! This library implements the legacy Anki scheduling algorithm (modified
//! SM-2, not FSRS) as a pure function library:
//! - Parsing learning-step specifications
//! - Due-date and interval math
//! - The four-state scheduling machine (new, learning, review, relearning)
//! - Answer-button interval previews
//!
//! The engine performs no I/O and holds no state: grading takes a card
//! snapshot, a rating, the scheduler settings and a reference time, and
//! returns the card's replacement scheduling fields. Persistence, decks and
//! review queues belong to the surrounding application.

pub mod error;
pub mod intervals;
pub mod scheduler;
pub mod steps;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use intervals::{
    due_after_days, due_after_minutes, format_interval, format_interval_days, is_interday,
};
pub use scheduler::{IntervalPreview, Rating, SchedulingResult, grade_card, preview_intervals};
pub use steps::parse_steps;
pub use types::card::{Card, CardState};
pub use types::settings::{LearningMode, SchedulerSettings};
pub use types::timestamp::Timestamp;
