// Raw upstream telemetry record (sonde, fuse and device-health streams share one shape)

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Flight phase tag carried by quality-controlled samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "UP")]
    Ascent,
    #[serde(rename = "HOR")]
    Level,
    #[serde(rename = "DOWN")]
    Descent,
}

impl Segment {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "UP" => Some(Self::Ascent),
            "HOR" => Some(Self::Level),
            "DOWN" => Some(Self::Descent),
            _ => None,
        }
    }

    /// Index into a `[ascent, level, descent]` triple.
    pub fn index(self) -> usize {
        match self {
            Self::Ascent => 0,
            Self::Level => 1,
            Self::Descent => 2,
        }
    }
}

/// One upstream record. Scalars are kept as raw JSON because upstream mixes numbers,
/// numeric strings and sentinel strings; the sanitizers decide what they mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above_sea_level: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_vol: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freqz: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raising_speed: Option<Value>,
    /// Upstream spells the field `segmemt`.
    #[serde(
        default,
        rename = "segmemt",
        deserialize_with = "deserialize_segment",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment: Option<Segment>,
}

/// Unknown or non-string tags count as untagged instead of failing the whole payload.
fn deserialize_segment<'de, D>(deserializer: D) -> Result<Option<Segment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(Segment::from_tag))
}

/// Profile fields kept for chart-data consumers; trims payload size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(rename = "segmemt", skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above_sea_level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<Value>,
}

impl From<Sample> for ProfileRecord {
    fn from(s: Sample) -> Self {
        Self {
            segment: s.segment,
            above_sea_level: s.above_sea_level,
            temperature: s.temperature,
            pressure: s.pressure,
            humidity: s.humidity,
            seconds: s.seconds,
        }
    }
}
