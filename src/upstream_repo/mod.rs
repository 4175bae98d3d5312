// Upstream data APIs: telemetry dataset, sounding (fuse) series, export passthrough.
// Every call returns Result<_, FetchError>; callers decide the fallback.

mod query;

use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use chrono::FixedOffset;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::models::{DataKind, FuseQuery, Sample};

pub use query::{QueryFilter, Record};

pub struct UpstreamRepo {
    http: Client,
    base_url: String,
    export_url: String,
    offset: FixedOffset,
}

/// Export response relayed to the caller as-is.
#[derive(Debug, Clone)]
pub struct Passthrough {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

#[derive(Deserialize)]
struct DatasetEnvelope {
    #[serde(default)]
    data: Option<Vec<Sample>>,
}

#[derive(Deserialize)]
struct SoundingEnvelope {
    #[serde(default)]
    data: Value,
}

impl UpstreamRepo {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.upstream.base_url.trim_end_matches('/').to_string(),
            export_url: config.upstream.export_url.clone(),
            offset: config.display_offset(),
        })
    }

    /// Zone used for zone-less upstream date strings.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Sonde samples of one flight; QC unless `kind` is raw.
    #[instrument(skip(self), fields(repo = "upstream", operation = "dataset"))]
    pub async fn dataset(
        &self,
        station: &str,
        tkyid: &str,
        kind: DataKind,
    ) -> Result<Vec<Sample>, FetchError> {
        let url = format!("{}/api/dataset/view.json", self.base_url);
        let mut params = vec![("station", station), ("tkyid", tkyid)];
        if kind == DataKind::Raw {
            params.push(("type", "raw"));
        }
        let body = self.get_json(&url, &params).await?;
        let envelope: DatasetEnvelope = serde_json::from_value(body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fuse-device samples over the flight window. An incomplete query (no fuse
    /// registered, unknown window) means there is nothing to fetch.
    #[instrument(skip(self), fields(repo = "upstream", operation = "sounding_messages"))]
    pub async fn sounding_messages(&self, query: &FuseQuery) -> Result<Vec<Sample>, FetchError> {
        let (true, Some(start), Some(end)) =
            (query.is_complete(), query.window.start, query.window.end)
        else {
            return Ok(Vec::new());
        };
        let url = format!("{}/api/dataset/getSoundingMsg", self.base_url);
        let start = start.to_string();
        let end = end.to_string();
        let params = [
            ("sondeCode", query.sonde_code.as_str()),
            ("startTime", start.as_str()),
            ("endTime", end.as_str()),
            ("pixel", "0"),
        ];
        let body = self.get_json(&url, &params).await?;
        let envelope: SoundingEnvelope = serde_json::from_value(body)?;
        // keyed object upstream; only the values matter
        let values = match envelope.data {
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Sample>, _>>()
            .map_err(FetchError::from)
    }

    /// Sounding export for one sonde, relayed with its status and body.
    #[instrument(skip(self), fields(repo = "upstream", operation = "export"))]
    pub async fn export(&self, sonde_code: &str) -> Result<Passthrough, FetchError> {
        let params = [
            ("key", "sondeCode"),
            ("value", sonde_code),
            ("type", "S"),
            ("query", ""),
            ("projection", ""),
        ];
        let resp = self.http.get(&self.export_url).query(&params).send().await?;
        let status = resp.status();
        let content_type = resp.headers().get(reqwest::header::CONTENT_TYPE).cloned();
        let body = resp.bytes().await?;
        Ok(Passthrough {
            status,
            content_type,
            body,
        })
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let resp = self.http.get(url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
