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

use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveTime;

use crate::types::timestamp::Timestamp;

/// Hour of the day at which interday reviews come due. Delays of a day or
/// more always land at this canonical hour, whatever the clock time of the
/// review that produced them.
const ROLLOVER_HOUR: i64 = 4;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Whether a delay spans at least one calendar day.
pub fn is_interday(minutes: f64) -> bool {
    minutes >= MINUTES_PER_DAY
}

/// Due timestamp for a delay given in minutes.
///
/// Intraday delays are exact: `now` plus the delay, to the millisecond.
/// Interday delays advance by whole calendar days and pin to the rollover
/// hour.
pub fn due_after_minutes(minutes: f64, now: Timestamp) -> Timestamp {
    if is_interday(minutes) {
        let days = (minutes / MINUTES_PER_DAY).floor() as i64;
        at_rollover(now.into_inner().date() + Duration::days(days))
    } else {
        let millis = (minutes * 60_000.0).round() as i64;
        Timestamp::new(now.into_inner() + Duration::milliseconds(millis))
    }
}

/// Due timestamp for a delay given in days, pinned to the rollover hour.
pub fn due_after_days(days: f64, now: Timestamp) -> Timestamp {
    at_rollover(now.into_inner().date() + Duration::days(days.round() as i64))
}

fn at_rollover(date: NaiveDate) -> Timestamp {
    Timestamp::new(date.and_time(NaiveTime::MIN) + Duration::hours(ROLLOVER_HOUR))
}

/// Short human label for a minute-granularity delay, e.g. "5m", "3h".
///
/// Thresholds are fixed: under an hour in minutes, under a day in hours,
/// everything else in days/months/years.
pub fn format_interval(minutes: f64) -> String {
    if minutes < 1.0 {
        return "<1m".to_string();
    }
    if minutes < 60.0 {
        return format!("{}m", minutes.round());
    }
    if minutes < MINUTES_PER_DAY {
        return format!("{}h", (minutes / 60.0).round());
    }
    let days = (minutes / MINUTES_PER_DAY).round();
    if days == 1.0 {
        return "1 day".to_string();
    }
    if days < 30.0 {
        return format!("{days} days");
    }
    format_months_or_years(days)
}

/// Short human label for a day-granularity interval, e.g. "3 months".
pub fn format_interval_days(days: f64) -> String {
    if days < 1.0 {
        return "<1 day".to_string();
    }
    if days == 1.0 {
        return "1 day".to_string();
    }
    if days < 30.0 {
        return format!("{} days", days.round());
    }
    format_months_or_years(days)
}

fn format_months_or_years(days: f64) -> String {
    if days < 365.0 {
        let months = (days / 30.0).round();
        if months == 1.0 {
            "1 month".to_string()
        } else {
            format!("{months} months")
        }
    } else {
        let years = (days / 365.0).round();
        if years == 1.0 {
            "1 year".to_string()
        } else {
            format!("{years} years")
        }
    }
}
