// Assembled, chart-ready series returned to web consumers or handed to the renderer

use serde::{Deserialize, Serialize};

use super::{DataKind, Threshold};

/// One value per Time Axis entry; `None` marks a missing or invalid reading.
pub type Channel = Vec<Option<f64>>;

/// `[lng, lat]`, either side nullable.
pub type Coordinate = [Option<f64>; 2];

/// A channel that is either flat (raw data) or split into `[ascent, level, descent]` (QC data).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelData {
    Flat(Channel),
    Segmented([Channel; 3]),
}

impl ChannelData {
    /// Empty channel with the nesting the data kind calls for.
    pub fn empty(kind: DataKind) -> Self {
        match kind {
            DataKind::Raw => Self::Flat(Vec::new()),
            DataKind::Qc => Self::Segmented([Vec::new(), Vec::new(), Vec::new()]),
        }
    }

    /// Length of the (sub-)channels; all three sub-channels share it.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(c) => c.len(),
            Self::Segmented(parts) => parts[0].len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extends with nulls up to `len`; never truncates.
    pub fn pad_to(&mut self, len: usize) {
        match self {
            Self::Flat(c) => pad_channel(c, len),
            Self::Segmented(parts) => parts.iter_mut().for_each(|c| pad_channel(c, len)),
        }
    }

    /// Sub-channels in drawing order, with a phase suffix for segmented data.
    pub fn parts(&self) -> Vec<(&'static str, &Channel)> {
        match self {
            Self::Flat(c) => vec![("", c)],
            Self::Segmented([up, hor, down]) => {
                vec![(" (up)", up), (" (level)", hor), (" (down)", down)]
            }
        }
    }
}

pub fn pad_channel(channel: &mut Channel, len: usize) {
    if channel.len() < len {
        channel.resize(len, None);
    }
}

/// Temperature / humidity / pressure / altitude profile of one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSeries {
    pub time: Vec<String>,
    pub temperature: ChannelData,
    pub humidity: ChannelData,
    pub pressure: ChannelData,
    pub altitude: ChannelData,
    pub track: Vec<Coordinate>,
}

impl ProfileSeries {
    pub fn empty(kind: DataKind) -> Self {
        Self {
            time: Vec::new(),
            temperature: ChannelData::empty(kind),
            humidity: ChannelData::empty(kind),
            pressure: ChannelData::empty(kind),
            altitude: ChannelData::empty(kind),
            track: Vec::new(),
        }
    }

    /// Extends every channel with nulls up to `len` entries; labels are the caller's job.
    pub fn pad_to(&mut self, len: usize) {
        for c in [
            &mut self.temperature,
            &mut self.humidity,
            &mut self.pressure,
            &mut self.altitude,
        ] {
            c.pad_to(len);
        }
        if self.track.len() < len {
            self.track.resize(len, [None, None]);
        }
    }
}

/// Sonde profile plus the fuse-device altitude, on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightSeries {
    #[serde(flatten)]
    pub profile: ProfileSeries,
    pub fuse_altitude: Channel,
}

impl HeightSeries {
    pub fn empty(kind: DataKind) -> Self {
        Self {
            profile: ProfileSeries::empty(kind),
            fuse_altitude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHealthSeries {
    pub time: Vec<String>,
    pub battery_voltage: Channel,
    pub frequency: Channel,
    pub rssi: Channel,
    pub rising_speed: Channel,
    pub threshold: Threshold,
}

impl DeviceHealthSeries {
    pub fn empty(threshold: Threshold) -> Self {
        Self {
            time: Vec::new(),
            battery_voltage: Vec::new(),
            frequency: Vec::new(),
            rssi: Vec::new(),
            rising_speed: Vec::new(),
            threshold,
        }
    }
}

/// Decimated flight track for the history map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTrack {
    pub lnglat: Vec<Coordinate>,
    pub last_time_height: Option<f64>,
}
