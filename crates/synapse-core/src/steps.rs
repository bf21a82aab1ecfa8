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

/// Parse a step specification into an ordered list of delays in minutes.
///
/// A specification is a whitespace-separated list of duration tokens: a
/// number (possibly fractional) with an optional unit suffix `m`, `h` or
/// `d`, defaulting to minutes. Examples:
///
/// - `"1m 10m"` -> `[1.0, 10.0]`
/// - `"1m 10m 1d"` -> `[1.0, 10.0, 1440.0]`
/// - `"1.5h 3d"` -> `[90.0, 4320.0]`
///
/// Malformed tokens are skipped with a warning rather than failing the
/// whole specification, and zero-length delays are dropped. An empty (or
/// entirely invalid) specification yields an empty list, which the
/// scheduler reads as "no learning phase configured".
pub fn parse_steps(spec: &str) -> Vec<f64> {
    spec.split_whitespace()
        .filter_map(|token| {
            let minutes = parse_token(token);
            if minutes.is_none() {
                log::warn!("Ignoring invalid step {token:?} in step specification");
            }
            minutes
        })
        .filter(|&minutes| minutes > 0.0)
        .collect()
}

fn parse_token(token: &str) -> Option<f64> {
    let token = token.to_ascii_lowercase();
    let (number, factor) = if let Some(rest) = token.strip_suffix('m') {
        (rest, 1.0)
    } else if let Some(rest) = token.strip_suffix('h') {
        (rest, 60.0)
    } else if let Some(rest) = token.strip_suffix('d') {
        (rest, 1440.0)
    } else {
        (token.as_str(), 1.0)
    };
    // Require a plain decimal number: no sign, no exponent, and a digit
    // before any fractional part.
    let valid = number.chars().next().is_some_and(|c| c.is_ascii_digit())
        && number.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !valid {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    Some(value * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_steps("1m 10m"), vec![1.0, 10.0]);
    }

    #[test]
    fn test_parse_mixed_units() {
        assert_eq!(parse_steps("1m 10m 1d"), vec![1.0, 10.0, 1440.0]);
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_steps("1h 2h"), vec![60.0, 120.0]);
    }

    #[test]
    fn test_unit_defaults_to_minutes() {
        assert_eq!(parse_steps("15 30"), vec![15.0, 30.0]);
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(parse_steps("0.5m 1.5h"), vec![0.5, 90.0]);
    }

    #[test]
    fn test_uppercase_units() {
        assert_eq!(parse_steps("10M 1D"), vec![10.0, 1440.0]);
    }

    #[test]
    fn test_empty_spec() {
        assert_eq!(parse_steps(""), Vec::<f64>::new());
        assert_eq!(parse_steps("   "), Vec::<f64>::new());
    }

    #[test]
    fn test_invalid_tokens_skipped() {
        assert_eq!(parse_steps("1m invalid 10m"), vec![1.0, 10.0]);
        assert_eq!(parse_steps("m 1x .5m -3m"), Vec::<f64>::new());
    }

    #[test]
    fn test_zero_steps_dropped() {
        assert_eq!(parse_steps("0m 10m 0d"), vec![10.0]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let spec = "1m 10m bogus 1d";
        assert_eq!(parse_steps(spec), parse_steps(spec));
    }
}
