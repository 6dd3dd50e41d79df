// File: crates/graphite-core/src/axis.rs
// Summary: Axis bound models: numeric or mirrored y minimum, numeric or date-valued x bounds.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBound {
    Number(f64),
    Text(String),
}

/// Lower bound of the y axis.
///
/// `Mirror` centres zero: the scale is computed once from zero and then
/// reflected so that `max == -min`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawBound")]
pub enum YAxisMin {
    Value(f64),
    Mirror,
}

impl Default for YAxisMin {
    fn default() -> Self { YAxisMin::Value(0.0) }
}

impl FromStr for YAxisMin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mirror" | "middle" | "center" => Ok(YAxisMin::Mirror),
            other => other
                .parse::<f64>()
                .map(YAxisMin::Value)
                .map_err(|_| ConfigError::UnknownAxisMode(other.to_string())),
        }
    }
}

impl TryFrom<RawBound> for YAxisMin {
    type Error = ConfigError;

    fn try_from(raw: RawBound) -> Result<Self, Self::Error> {
        match raw {
            RawBound::Number(v) => Ok(YAxisMin::Value(v)),
            RawBound::Text(s) => s.parse(),
        }
    }
}

/// A bound on the scatter x axis, either a plain number or a date
/// converted to epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawBound")]
pub struct XBound(pub f64);

impl TryFrom<RawBound> for XBound {
    type Error = ConfigError;

    fn try_from(raw: RawBound) -> Result<Self, Self::Error> {
        match raw {
            RawBound::Number(v) => Ok(XBound(v)),
            RawBound::Text(s) => parse_date_millis(&s).map(XBound),
        }
    }
}

impl From<f64> for XBound {
    fn from(v: f64) -> Self { XBound(v) }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or RFC 3339 into epoch
/// milliseconds (naive forms are taken as UTC).
pub fn parse_date_millis(s: &str) -> Result<f64, ConfigError> {
    let t = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(dt.timestamp_millis() as f64);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Ok(dt.and_utc().timestamp_millis() as f64);
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis() as f64);
            }
        }
    }
    Err(ConfigError::BadDate(t.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_minimums() {
        for s in ["mirror", "middle", "center"] {
            assert_eq!(s.parse::<YAxisMin>().unwrap(), YAxisMin::Mirror);
        }
        assert_eq!("-5".parse::<YAxisMin>().unwrap(), YAxisMin::Value(-5.0));
        assert!(matches!("sideways".parse::<YAxisMin>(), Err(ConfigError::UnknownAxisMode(_))));
    }

    #[test]
    fn dates_become_millis() {
        assert_eq!(parse_date_millis("1970-01-02").unwrap(), 86_400_000.0);
        assert_eq!(parse_date_millis("1970-01-01 00:00:01").unwrap(), 1_000.0);
        assert_eq!(parse_date_millis("1970-01-01T00:00:00+01:00").unwrap(), -3_600_000.0);
        assert!(parse_date_millis("yesterday").is_err());
    }

    #[test]
    fn bounds_deserialize_from_json() {
        let m: YAxisMin = serde_json::from_str("\"mirror\"").unwrap();
        assert_eq!(m, YAxisMin::Mirror);
        let x: XBound = serde_json::from_str("\"1970-01-02\"").unwrap();
        assert_eq!(x, XBound(86_400_000.0));
        let x: XBound = serde_json::from_str("12.5").unwrap();
        assert_eq!(x, XBound(12.5));
    }
}
