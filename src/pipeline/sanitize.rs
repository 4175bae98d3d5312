// Per-channel validation of single upstream readings.
// Every function here is total: bad input becomes None, never an error.

use serde_json::Value;

/// Upstream placeholder for "no measurement".
const SENTINEL_MISSING: &str = "99999.000000";
/// Altitude placeholder written before the first GPS fix.
const SENTINEL_ZERO_ALTITUDE: &str = "0.000000";

const TEMPERATURE_MAX: f64 = 200.0;
const PRESSURE_MAX: f64 = 2000.0;

/// Limits that differ between consumers of the same channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub humidity_max: f64,
    /// Altitudes at or above this are rejected; `None` means no ceiling.
    pub altitude_ceiling: Option<f64>,
}

impl Bounds {
    /// Profile chart.
    pub const PROFILE: Bounds = Bounds {
        humidity_max: 100.0,
        altitude_ceiling: None,
    };
    /// Height chart; tolerates supersaturation readings.
    pub const HEIGHT: Bounds = Bounds {
        humidity_max: 120.0,
        altitude_ceiling: None,
    };

    pub fn humidity(self) -> ChannelKind {
        ChannelKind::Humidity {
            max: self.humidity_max,
        }
    }

    pub fn altitude(self) -> ChannelKind {
        ChannelKind::Altitude {
            ceiling: self.altitude_ceiling,
        }
    }
}

/// Channel selector for [`sanitize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelKind {
    Temperature,
    Humidity { max: f64 },
    Pressure,
    Altitude { ceiling: Option<f64> },
    Longitude,
    Latitude,
    /// Voltage, frequency, rssi, rising speed: rounded to `precision` decimals.
    Generic { precision: u32 },
}

impl ChannelKind {
    /// Fuse-device altitude. Its receivers report garbage heights after burst.
    pub const FUSE_ALTITUDE: ChannelKind = ChannelKind::Altitude {
        ceiling: Some(40_000.0),
    };
}

pub fn sanitize(kind: ChannelKind, raw: Option<&Value>) -> Option<f64> {
    match kind {
        ChannelKind::Temperature => temperature(raw),
        ChannelKind::Humidity { max } => humidity(raw, max),
        ChannelKind::Pressure => pressure(raw),
        ChannelKind::Altitude { ceiling } => altitude(raw, ceiling),
        ChannelKind::Longitude | ChannelKind::Latitude => coordinate(raw),
        ChannelKind::Generic { precision } => generic(raw, precision),
    }
}

pub fn temperature(raw: Option<&Value>) -> Option<f64> {
    reading(raw)
        .filter(|v| *v <= TEMPERATURE_MAX)
        .map(|v| round_to(v, 1))
}

pub fn humidity(raw: Option<&Value>, max: f64) -> Option<f64> {
    reading(raw).filter(|v| *v <= max).map(|v| round_to(v, 1))
}

pub fn pressure(raw: Option<&Value>) -> Option<f64> {
    reading(raw)
        .filter(|v| *v <= PRESSURE_MAX)
        .map(|v| round_to(v, 1))
}

pub fn altitude(raw: Option<&Value>, ceiling: Option<f64>) -> Option<f64> {
    if raw.and_then(Value::as_str) == Some(SENTINEL_ZERO_ALTITUDE) {
        return None;
    }
    reading(raw)
        .filter(|v| *v >= 0.0)
        .filter(|v| ceiling.is_none_or(|c| *v < c))
        .map(|v| round_to(v, 1))
}

/// Longitude or latitude. Zero (numeric or string) is not a fix.
pub fn coordinate(raw: Option<&Value>) -> Option<f64> {
    reading(raw)
        .filter(|v| *v != 0.0)
        .map(|v| round_to(v, 8))
}

/// Zero (numeric or `"0"`) passes through unrounded; other falsy values are empty.
pub fn generic(raw: Option<&Value>, precision: u32) -> Option<f64> {
    let raw = raw?;
    if is_zero(raw) {
        return Some(0.0);
    }
    if is_falsy(raw) {
        return None;
    }
    number(raw).map(|v| round_to(v, precision))
}

/// Rounds half away from zero to `precision` decimals.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

/// Common sentinel screen shared by the scalar channels, then numeric conversion.
fn reading(raw: Option<&Value>) -> Option<f64> {
    let raw = raw?;
    if is_sentinel(raw) {
        return None;
    }
    number(raw)
}

fn is_sentinel(raw: &Value) -> bool {
    match raw {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => matches!(s.as_str(), "" | "NaN" | SENTINEL_MISSING),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn is_zero(raw: &Value) -> bool {
    match raw {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s == "0",
        _ => false,
    }
}

fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_none_or(f64::is_nan),
        _ => false,
    }
}

/// Numeric value of a number or numeric string; non-finite results are rejected.
fn number(raw: &Value) -> Option<f64> {
    let v = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    v.is_finite().then_some(v)
}
