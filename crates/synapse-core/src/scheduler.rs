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
use crate::intervals::due_after_days;
use crate::intervals::due_after_minutes;
use crate::intervals::format_interval;
use crate::intervals::format_interval_days;
use crate::steps::parse_steps;
use crate::types::card::Card;
use crate::types::card::CardState;
use crate::types::settings::SchedulerSettings;
use crate::types::timestamp::Timestamp;

/// Recall quality reported by the user after seeing a card's answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub fn as_str(&self) -> &str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl TryFrom<String> for Rating {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "again" => Ok(Rating::Again),
            "hard" => Ok(Rating::Hard),
            "good" => Ok(Rating::Good),
            "easy" => Ok(Rating::Easy),
            _ => fail(format!("unknown rating: {value}")),
        }
    }
}

impl From<Rating> for String {
    fn from(rating: Rating) -> String {
        rating.as_str().to_string()
    }
}

/// The lower bound on a card's ease factor.
const EASE_MINIMUM: f64 = 1.3;
/// The upper bound on a card's ease factor.
const EASE_MAXIMUM: f64 = 3.0;

/// Ease lost when a review card is forgotten.
const AGAIN_EASE_PENALTY: f64 = 0.2;
/// Ease lost when a review card is rated Hard.
const HARD_EASE_PENALTY: f64 = 0.15;
/// Ease gained when a review card is rated Easy.
const EASY_EASE_BONUS: f64 = 0.15;

/// The full replacement field set for a graded card.
///
/// Grading never mutates a [`Card`]: the caller merges this into storage
/// (or via [`SchedulingResult::into_card`]), keeping the pre-grade snapshot
/// around for its review log.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub state: CardState,
    pub due_at: Timestamp,
    pub interval_days: f64,
    pub ease: f64,
    pub learning_step_index: usize,
    pub reps: usize,
    pub lapses: usize,
}

impl SchedulingResult {
    /// The card as it stands after this grading.
    pub fn into_card(self) -> Card {
        Card {
            state: self.state,
            due_at: self.due_at,
            interval_days: self.interval_days,
            ease: self.ease,
            learning_step_index: self.learning_step_index,
            reps: self.reps,
            lapses: self.lapses,
        }
    }
}

fn clamp_ease(ease: f64) -> f64 {
    ease.max(EASE_MINIMUM).min(EASE_MAXIMUM)
}

/// A successful review must always move the card forward: if the computed
/// interval fails to beat the old one (pathological ease and multiplier
/// combinations can do this), force a one-day gain.
fn ensure_minimum_progress(new_interval: f64, old_interval: f64, minimum_interval: f64) -> f64 {
    if old_interval > 0.0 && new_interval <= old_interval {
        old_interval + 1.0
    } else {
        new_interval.max(minimum_interval)
    }
}

/// Grade a card and compute its replacement scheduling fields.
///
/// Pure: identical inputs (card, rating, settings, reference time) always
/// produce identical output. The result never has state [`CardState::New`].
pub fn grade_card(
    card: &Card,
    rating: Rating,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> SchedulingResult {
    match card.state {
        CardState::New => schedule_new(rating, settings, now),
        CardState::Learning => schedule_learning(card, rating, settings, now),
        CardState::Review => schedule_review(card, rating, settings, now),
        CardState::Relearning => schedule_relearning(card, rating, settings, now),
    }
}

fn schedule_new(rating: Rating, settings: &SchedulerSettings, now: Timestamp) -> SchedulingResult {
    let steps = parse_steps(&settings.learning_steps);

    // No learning phase configured: any rating graduates immediately.
    if steps.is_empty() {
        let interval = match rating {
            Rating::Easy => settings.easy_interval_days,
            _ => settings.graduating_interval_days,
        };
        return SchedulingResult {
            state: CardState::Review,
            due_at: due_after_days(interval, now),
            interval_days: interval,
            ease: settings.starting_ease,
            learning_step_index: 0,
            reps: 1,
            lapses: 0,
        };
    }

    match rating {
        // Easy skips the learning phase entirely.
        Rating::Easy => SchedulingResult {
            state: CardState::Review,
            due_at: due_after_days(settings.easy_interval_days, now),
            interval_days: settings.easy_interval_days,
            ease: settings.starting_ease,
            learning_step_index: 0,
            reps: 1,
            lapses: 0,
        },
        Rating::Again => SchedulingResult {
            state: CardState::Learning,
            due_at: due_after_minutes(steps[0], now),
            interval_days: 0.0,
            ease: settings.starting_ease,
            learning_step_index: 0,
            // Again on a brand-new card does not count as a repetition.
            reps: 0,
            lapses: 0,
        },
        // Hard is not materially distinct from Good for a card with no
        // history: both land on the first step.
        Rating::Hard | Rating::Good => SchedulingResult {
            state: CardState::Learning,
            due_at: due_after_minutes(steps[0], now),
            interval_days: 0.0,
            ease: settings.starting_ease,
            learning_step_index: 0,
            reps: 1,
            lapses: 0,
        },
    }
}

fn schedule_learning(
    card: &Card,
    rating: Rating,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> SchedulingResult {
    let steps = parse_steps(&settings.learning_steps);

    if steps.is_empty() {
        return graduate(card, settings.graduating_interval_days, now);
    }

    // The step sequence may have shrunk since the card was last scheduled.
    let current = card.learning_step_index.min(steps.len() - 1);

    match rating {
        Rating::Easy => graduate(card, settings.easy_interval_days, now),
        Rating::Again => SchedulingResult {
            state: CardState::Learning,
            due_at: due_after_minutes(steps[0], now),
            interval_days: 0.0,
            ease: card.ease,
            learning_step_index: 0,
            reps: card.reps,
            lapses: card.lapses,
        },
        Rating::Good => {
            let next = current + 1;
            if next >= steps.len() {
                return graduate(card, settings.graduating_interval_days, now);
            }
            SchedulingResult {
                state: CardState::Learning,
                due_at: due_after_minutes(steps[next], now),
                interval_days: 0.0,
                ease: card.ease,
                learning_step_index: next,
                reps: card.reps + 1,
                lapses: card.lapses,
            }
        }
        Rating::Hard => {
            let delay = if current == 0 {
                if steps.len() == 1 {
                    // A single step has no next step to average against:
                    // stretch it by half, capped at one extra day.
                    f64::min(steps[0] * 1.5, steps[0] + 1440.0)
                } else {
                    (steps[0] + steps[1]) / 2.0
                }
            } else {
                // Past the first step, Hard repeats the current delay.
                steps[current]
            };
            SchedulingResult {
                state: CardState::Learning,
                due_at: due_after_minutes(delay, now),
                interval_days: 0.0,
                ease: card.ease,
                learning_step_index: current,
                reps: card.reps + 1,
                lapses: card.lapses,
            }
        }
    }
}

/// Leave the learning or relearning phase for review at the given interval,
/// preserving the card's ease and lapse count.
fn graduate(card: &Card, interval_days: f64, now: Timestamp) -> SchedulingResult {
    SchedulingResult {
        state: CardState::Review,
        due_at: due_after_days(interval_days, now),
        interval_days,
        ease: card.ease,
        learning_step_index: 0,
        reps: card.reps + 1,
        lapses: card.lapses,
    }
}

fn schedule_review(
    card: &Card,
    rating: Rating,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> SchedulingResult {
    let (interval, ease) = match rating {
        Rating::Again => return lapse(card, settings, now),
        Rating::Hard => (
            card.interval_days * settings.hard_interval,
            clamp_ease(card.ease - HARD_EASE_PENALTY),
        ),
        Rating::Good => (card.interval_days * card.ease, card.ease),
        // The interval grows from the pre-bump ease; the bump only pays off
        // from the next review on.
        Rating::Easy => (
            card.interval_days * card.ease * settings.easy_bonus,
            clamp_ease(card.ease + EASY_EASE_BONUS),
        ),
    };

    let interval = interval * settings.interval_modifier;
    // max-then-min, not clamp: inverted bounds must not panic.
    let interval = interval
        .max(settings.minimum_interval_days)
        .min(settings.maximum_interval_days);
    let interval =
        ensure_minimum_progress(interval, card.interval_days, settings.minimum_interval_days);
    let interval = interval.round();

    SchedulingResult {
        state: CardState::Review,
        due_at: due_after_days(interval, now),
        interval_days: interval,
        ease,
        learning_step_index: 0,
        reps: card.reps + 1,
        lapses: card.lapses,
    }
}

/// A review card was forgotten: drop the ease, count the lapse, and enter
/// relearning (or snap straight back to review when no relearning steps are
/// configured).
fn lapse(card: &Card, settings: &SchedulerSettings, now: Timestamp) -> SchedulingResult {
    let ease = clamp_ease(card.ease - AGAIN_EASE_PENALTY);
    let steps = parse_steps(&settings.relearning_steps);

    match steps.first() {
        Some(&first) => {
            // The interval to return to once relearning completes; the due
            // date is driven by the relearning step, not by this.
            let interval =
                f64::max(1.0, (card.interval_days * settings.new_interval_multiplier).round());
            SchedulingResult {
                state: CardState::Relearning,
                due_at: due_after_minutes(first, now),
                interval_days: interval,
                ease,
                learning_step_index: 0,
                reps: card.reps + 1,
                lapses: card.lapses + 1,
            }
        }
        None => SchedulingResult {
            state: CardState::Review,
            due_at: due_after_days(settings.minimum_interval_days, now),
            interval_days: settings.minimum_interval_days,
            ease,
            learning_step_index: 0,
            reps: card.reps + 1,
            lapses: card.lapses + 1,
        },
    }
}

fn schedule_relearning(
    card: &Card,
    rating: Rating,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> SchedulingResult {
    let steps = parse_steps(&settings.relearning_steps);

    if steps.is_empty() {
        return graduate(card, settings.minimum_interval_days, now);
    }

    let current = card.learning_step_index.min(steps.len() - 1);

    match rating {
        Rating::Easy => graduate(card, settings.minimum_interval_days, now),
        Rating::Again => SchedulingResult {
            state: CardState::Relearning,
            due_at: due_after_minutes(steps[0], now),
            interval_days: card.interval_days,
            ease: card.ease,
            learning_step_index: 0,
            reps: card.reps,
            lapses: card.lapses,
        },
        Rating::Good => {
            let next = current + 1;
            if next >= steps.len() {
                return graduate(card, settings.minimum_interval_days, now);
            }
            SchedulingResult {
                state: CardState::Relearning,
                due_at: due_after_minutes(steps[next], now),
                interval_days: card.interval_days,
                ease: card.ease,
                learning_step_index: next,
                reps: card.reps + 1,
                lapses: card.lapses,
            }
        }
        // Unlike learning, Hard never averages here: it always repeats the
        // current step's delay.
        Rating::Hard => SchedulingResult {
            state: CardState::Relearning,
            due_at: due_after_minutes(steps[current], now),
            interval_days: card.interval_days,
            ease: card.ease,
            learning_step_index: current,
            reps: card.reps + 1,
            lapses: card.lapses,
        },
    }
}

/// What each answer button would do, formatted for display.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct IntervalPreview {
    pub again: String,
    /// Absent for new cards: Hard is not a materially distinct action
    /// before the card has any history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard: Option<String>,
    pub good: String,
    pub easy: String,
}

/// Run every rating through the scheduler against the same reference time,
/// without committing anything, and format the outcomes for the answer
/// buttons.
pub fn preview_intervals(
    card: &Card,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> IntervalPreview {
    let hard = if card.state == CardState::New {
        None
    } else {
        Some(preview_rating(card, Rating::Hard, settings, now))
    };
    IntervalPreview {
        again: preview_rating(card, Rating::Again, settings, now),
        hard,
        good: preview_rating(card, Rating::Good, settings, now),
        easy: preview_rating(card, Rating::Easy, settings, now),
    }
}

fn preview_rating(
    card: &Card,
    rating: Rating,
    settings: &SchedulerSettings,
    now: Timestamp,
) -> String {
    let result = grade_card(card, rating, settings, now);
    match result.state {
        // Cards still in a step phase are due minutes from now; everything
        // else is measured in days.
        CardState::Learning | CardState::Relearning => {
            format_interval(result.due_at.minutes_since(now).round())
        }
        CardState::New | CardState::Review => format_interval_days(result.interval_days),
    }
}
