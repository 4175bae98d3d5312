// Flight metadata from the query API and the manufacturer lookup tables

use serde::{Deserialize, Serialize};

/// Latest flight of a station, as shown on the history map.
/// Every field is an empty string when the query API has nothing for the station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSonde {
    pub tkyid: String,
    pub start_time: String,
    pub end_time: String,
    pub station_name: String,
    pub station_num: String,
    pub factory_name: String,
}

/// Launch and finish time of one flight, epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Flight summary needed by the device-health chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightInfo {
    pub window: FlightWindow,
    pub manufacturer_code: Option<u32>,
}

/// Arguments for the sounding (fuse) time-series API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuseQuery {
    /// Fuse device code; empty when the sonde has no fuse registered.
    pub sonde_code: String,
    pub window: FlightWindow,
}

impl FuseQuery {
    pub fn is_complete(&self) -> bool {
        !self.sonde_code.is_empty() && self.window.start.is_some() && self.window.end.is_some()
    }
}

/// Battery voltage bounds drawn as reference lines on the device-health chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub max: f64,
    pub normal: f64,
    pub min: f64,
}

struct Manufacturer {
    code: u32,
    name: &'static str,
    threshold: Threshold,
}

/// Known sonde manufacturers by upstream code.
///
/// The voltage bounds are assumed nominal values for each maker's battery pack.
/// They are not taken from measured manufacturer data; replace them when datasheet
/// figures are available.
const MANUFACTURERS: &[Manufacturer] = &[
    Manufacturer {
        code: 7,
        name: "华云天仪",
        threshold: Threshold { max: 4.2, normal: 3.7, min: 3.3 },
    },
    Manufacturer {
        code: 10,
        name: "华云升达",
        threshold: Threshold { max: 6.0, normal: 5.0, min: 4.5 },
    },
    Manufacturer {
        code: 11,
        name: "华云天仪",
        threshold: Threshold { max: 4.2, normal: 3.7, min: 3.3 },
    },
    Manufacturer {
        code: 20,
        name: "上海长望",
        threshold: Threshold { max: 4.2, normal: 3.6, min: 3.0 },
    },
    Manufacturer {
        code: 30,
        name: "太原",
        threshold: Threshold { max: 6.5, normal: 5.5, min: 4.8 },
    },
    Manufacturer {
        code: 40,
        name: "航天新气象",
        threshold: Threshold { max: 4.2, normal: 3.7, min: 3.2 },
    },
    Manufacturer {
        code: 50,
        name: "南京大桥",
        threshold: Threshold { max: 6.0, normal: 5.2, min: 4.6 },
    },
];

fn manufacturer(code: u32) -> Option<&'static Manufacturer> {
    MANUFACTURERS.iter().find(|m| m.code == code)
}

/// Voltage bounds for a manufacturer code; unknown codes get all zeros.
pub fn threshold_for(code: Option<u32>) -> Threshold {
    code.and_then(manufacturer)
        .map(|m| m.threshold)
        .unwrap_or_default()
}

/// Display name for a manufacturer code; unknown codes get "--".
pub fn manufacturer_name(code: Option<u32>) -> &'static str {
    code.and_then(manufacturer).map(|m| m.name).unwrap_or("--")
}
