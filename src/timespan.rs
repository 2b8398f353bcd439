//! Elapsed time with a clock-style text form, e.g. lap and race times.
//!
//! Accepted input is `[-][d.]hh:mm[:ss[.fraction]]`, or a bare integer
//! meaning whole days. Display always renders `[-][d.]hh:mm:ss[.fffffff]`
//! with seven fractional digits when there is a sub-second part.

use std::{fmt, str::FromStr};

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;
const NANOS_PER_TICK: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time span '{input}': {reason}")]
pub struct ParseTimeSpanError {
    input: String,
    reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan(TimeDelta);

impl Default for TimeSpan {
    fn default() -> Self {
        Self(TimeDelta::zero())
    }
}

impl TimeSpan {
    pub fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self(
            TimeDelta::hours(hours) + TimeDelta::minutes(minutes) + TimeDelta::seconds(seconds),
        )
    }

    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }

    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl From<TimeDelta> for TimeSpan {
    fn from(delta: TimeDelta) -> Self {
        Self(delta)
    }
}

fn parse_component(text: &str, input: &str, max: Option<i64>) -> Result<i64, ParseTimeSpanError> {
    let invalid = |reason| ParseTimeSpanError {
        input: input.to_string(),
        reason,
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected digits"));
    }
    let value = text.parse::<i64>().map_err(|_| invalid("component too large"))?;
    match max {
        Some(limit) if value >= limit => Err(invalid("component out of range")),
        _ => Ok(value),
    }
}

fn parse_fraction(text: &str, input: &str) -> Result<i64, ParseTimeSpanError> {
    if text.is_empty() || text.len() > 9 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseTimeSpanError {
            input: input.to_string(),
            reason: "fraction must be 1 to 9 digits",
        });
    }
    let padded = format!("{text:0<9}");
    parse_component(&padded, input, None)
}

impl FromStr for TimeSpan {
    type Err = ParseTimeSpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, body) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let parts = body.split(':').collect::<Vec<_>>();
        let (days, hours, minutes, seconds, nanos) = match parts.as_slice() {
            [days] => (parse_component(days, input, None)?, 0, 0, 0, 0),
            [head, minutes, rest @ ..] if rest.len() <= 1 => {
                let (days, hours) = match head.split_once('.') {
                    Some((days, hours)) => (parse_component(days, input, None)?, hours),
                    None => (0, *head),
                };
                let hours = parse_component(hours, input, Some(24))?;
                let minutes = parse_component(minutes, input, Some(60))?;
                let (seconds, nanos) = match rest.first() {
                    Some(tail) => match tail.split_once('.') {
                        Some((seconds, fraction)) => (
                            parse_component(seconds, input, Some(60))?,
                            parse_fraction(fraction, input)?,
                        ),
                        None => (parse_component(tail, input, Some(60))?, 0),
                    },
                    None => (0, 0),
                };
                (days, hours, minutes, seconds, nanos)
            }
            _ => {
                return Err(ParseTimeSpanError {
                    input: input.to_string(),
                    reason: "expected [d.]hh:mm[:ss[.fraction]]",
                });
            }
        };

        let clock_seconds = hours
            .checked_mul(3_600)
            .and_then(|secs| secs.checked_add(minutes.checked_mul(60)?))
            .and_then(|secs| secs.checked_add(seconds));
        let delta = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| secs.checked_add(clock_seconds?))
            .and_then(TimeDelta::try_seconds)
            .and_then(|whole| whole.checked_add(&TimeDelta::nanoseconds(nanos)))
            .ok_or_else(|| ParseTimeSpanError {
                input: input.to_string(),
                reason: "value out of range",
            })?;
        Ok(Self(if negative { -delta } else { delta }))
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < TimeDelta::zero();
        let magnitude = if negative { -self.0 } else { self.0 };
        let total_seconds = magnitude.num_seconds();
        let nanos = magnitude.subsec_nanos().unsigned_abs();
        let days = total_seconds / SECONDS_PER_DAY;
        let hours = (total_seconds % SECONDS_PER_DAY) / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;

        if negative {
            f.write_str("-")?;
        }
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if nanos > 0 {
            write!(f, ".{:07}", nanos / NANOS_PER_TICK)?;
        }
        Ok(())
    }
}

impl Serialize for TimeSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_style_spans() {
        assert_eq!("00:01:30".parse::<TimeSpan>().unwrap(), TimeSpan::from_hms(0, 1, 30));
        assert_eq!("01:02".parse::<TimeSpan>().unwrap(), TimeSpan::from_hms(1, 2, 0));
        assert_eq!(
            "2.03:04:05".parse::<TimeSpan>().unwrap(),
            TimeSpan::from_hms(51, 4, 5)
        );
        assert_eq!("3".parse::<TimeSpan>().unwrap(), TimeSpan::from_hms(72, 0, 0));
    }

    #[test]
    fn parses_fraction_and_sign() {
        let span = "-00:00:01.5".parse::<TimeSpan>().unwrap();
        assert_eq!(span.as_delta(), -TimeDelta::milliseconds(1_500));
        assert_eq!(span.to_string(), "-00:00:01.5000000");
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!("00:60:00".parse::<TimeSpan>().is_err());
        assert!("24:00:00".parse::<TimeSpan>().is_err());
        assert!("1:2:3:4".parse::<TimeSpan>().is_err());
        assert!("ab:cd".parse::<TimeSpan>().is_err());
        assert!("".parse::<TimeSpan>().is_err());
    }

    #[test]
    fn rejects_spans_beyond_the_representable_range() {
        let err = "106751991167.07:12:55.9".parse::<TimeSpan>().unwrap_err();
        assert_eq!(err.reason, "value out of range");
        assert!("106751991167.07:12:55".parse::<TimeSpan>().is_ok());
        assert!("999999999999999".parse::<TimeSpan>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["00:00:45", "1.00:00:00", "12:34:56.0000001"] {
            let span = text.parse::<TimeSpan>().unwrap();
            assert_eq!(span.to_string(), text);
        }
    }

    #[test]
    fn serializes_as_text() {
        let json = serde_json::to_string(&TimeSpan::from_hms(0, 0, 45)).unwrap();
        assert_eq!(json, "\"00:00:45\"");
        let back: TimeSpan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeSpan::from_hms(0, 0, 45));
    }
}
