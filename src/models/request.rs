// Inbound request bodies and the flags derived from them

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Quality-controlled (default) or raw upstream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Qc,
    Raw,
}

impl DataKind {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("raw") => Self::Raw,
            _ => Self::Qc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qc => "qc",
            Self::Raw => "raw",
        }
    }
}

/// Who asked: the web front-end wants structured JSON, everyone else an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumer {
    Web,
    Display,
}

impl Consumer {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("web") => Self::Web,
            _ => Self::Display,
        }
    }
}

/// Body of /image, /heightImage and /deviceInfoImage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub station: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tkyid: Option<String>,
    #[serde(default, rename = "type")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
}

impl ChartRequest {
    pub fn kind(&self) -> DataKind {
        DataKind::from_flag(self.data_type.as_deref())
    }

    pub fn consumer(&self) -> Consumer {
        Consumer::from_flag(self.from.as_deref())
    }
}

/// Body of /gethistoryline: comma-separated station ids.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryRequest {
    #[serde(default)]
    pub stations: Option<Value>,
}

/// Body of /sondedataforecharts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub station: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tkyid: Option<String>,
    #[serde(default)]
    pub res_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(default)]
    pub sonde_code: Option<String>,
}

/// Accepts ids sent as JSON strings or numbers; empty strings count as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
