// Timestamp parsing (upstream formats) and axis label formatting

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde_json::Value;

use crate::models::Sample;

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// How Time Axis entries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `HH:mm:ss`, for charts.
    Clock,
    /// `YYYY-MM-DD HH:mm:ss`, for tabular consumers.
    DateTime,
}

impl LabelStyle {
    pub fn format(self, epoch_seconds: i64, offset: FixedOffset) -> String {
        let Some(utc) = DateTime::from_timestamp(epoch_seconds, 0) else {
            return String::new();
        };
        let local = utc.with_timezone(&offset);
        match self {
            Self::Clock => local.format("%H:%M:%S").to_string(),
            Self::DateTime => local.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Epoch second of a sample: `seconds` when present, else `timeStamp`.
pub fn sample_time(sample: &Sample, offset: FixedOffset) -> Option<i64> {
    match (&sample.seconds, &sample.time_stamp) {
        (Some(seconds), _) => epoch_seconds(seconds),
        (None, Some(stamp)) => timestamp_seconds(stamp, offset),
        (None, None) => None,
    }
}

/// A `seconds` field: integer, float or numeric string. Zero means "no time".
pub fn epoch_seconds(raw: &Value) -> Option<i64> {
    let secs = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.floor() as i64))?
        }
        _ => return None,
    };
    (secs > 0).then_some(secs)
}

/// A `timeStamp` field: date string, or epoch milliseconds.
pub fn timestamp_seconds(raw: &Value, offset: FixedOffset) -> Option<i64> {
    match raw {
        Value::String(s) => parse_datetime(s, offset),
        Value::Number(n) => n.as_i64().map(|ms| ms.div_euclid(1000)),
        _ => None,
    }
}

/// RFC 3339, or a zone-less date-time read in `offset`. Sub-second parts are dropped.
pub fn parse_datetime(s: &str, offset: FixedOffset) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|dt| dt.timestamp())
}
