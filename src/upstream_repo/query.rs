// Device-metadata query API (POST form, `_RTN_CODE_/_MSG_/_DATA_` envelope)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::instrument;

use super::UpstreamRepo;
use crate::error::FetchError;
use crate::models::{FlightInfo, FlightWindow, StationSonde, manufacturer_name};
use crate::pipeline::clock::parse_datetime;

/// One row of a query result.
pub type Record = Map<String, Value>;

const FLIGHT_TABLE: &str = "TK_TKY_STAT_DATA";
const FUSE_TABLE: &str = "TK_SONDE_FUSE";

/// `{FD, OP, WD}` filter term.
#[derive(Debug, Clone, Serialize)]
pub struct QueryFilter<'a> {
    #[serde(rename = "FD")]
    pub field: &'a str,
    #[serde(rename = "OP")]
    pub op: &'a str,
    #[serde(rename = "WD")]
    pub value: &'a str,
}

impl<'a> QueryFilter<'a> {
    pub fn eq(field: &'a str, value: &'a str) -> Self {
        Self {
            field,
            op: "=",
            value,
        }
    }
}

#[derive(Deserialize)]
struct QueryEnvelope {
    #[serde(rename = "_RTN_CODE_", default)]
    rtn_code: Option<Value>,
    #[serde(rename = "_MSG_", default)]
    msg: Option<String>,
    #[serde(rename = "_DATA_", default)]
    data: Option<Vec<Record>>,
}

impl QueryEnvelope {
    fn into_records(self) -> Result<Vec<Record>, FetchError> {
        let code_failed = self.rtn_code.as_ref().and_then(Value::as_str) == Some("ERROR");
        let msg = self.msg.unwrap_or_default();
        if code_failed || msg.starts_with("ERROR") {
            return Err(FetchError::Logical(msg));
        }
        Ok(self.data.unwrap_or_default())
    }
}

impl UpstreamRepo {
    async fn query(
        &self,
        table: &str,
        filters: &[QueryFilter<'_>],
        page: Option<Value>,
    ) -> Result<Vec<Record>, FetchError> {
        let url = format!("{}/project/{}.query.do", self.base_url, table);
        let mut form = vec![("_query_param", serde_json::to_string(filters)?)];
        if let Some(page) = page {
            form.push(("data", page.to_string()));
        }
        let resp = self.http.post(url).form(&form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let bytes = resp.bytes().await?;
        let envelope: QueryEnvelope = serde_json::from_slice(&bytes)?;
        envelope.into_records()
    }

    /// Most recently finished flight of a station.
    #[instrument(skip(self), fields(repo = "upstream", operation = "latest_station_sonde"))]
    pub async fn latest_station_sonde(&self, station: &str) -> Result<StationSonde, FetchError> {
        let page = json!({ "_PAGE_": { "NOWPAGE": 1, "SHOWNUM": 1, "ORDER": "FINISHED_TIME desc" } });
        let records = self
            .query(
                FLIGHT_TABLE,
                &[QueryFilter::eq("STATION_NUMBER", station)],
                Some(page),
            )
            .await?;
        let Some(rec) = records.first() else {
            return Ok(StationSonde::default());
        };
        Ok(StationSonde {
            tkyid: text(rec, "TKYID"),
            start_time: text(rec, "FLY_START_TIME"),
            end_time: text(rec, "EXPLOSION_TIME"),
            station_name: text(rec, "STATION_NAME"),
            station_num: text(rec, "STATION_NUMBER"),
            factory_name: manufacturer_name(manufacturer_code(rec)).to_string(),
        })
    }

    /// Flight window and manufacturer of one sonde.
    #[instrument(skip(self), fields(repo = "upstream", operation = "flight_info"))]
    pub async fn flight_info(&self, station: &str, tkyid: &str) -> Result<FlightInfo, FetchError> {
        let records = self
            .query(
                FLIGHT_TABLE,
                &[
                    QueryFilter::eq("STATION_NUMBER", station),
                    QueryFilter::eq("TKYID", tkyid),
                ],
                None,
            )
            .await?;
        let Some(rec) = records.first() else {
            return Ok(FlightInfo::default());
        };
        Ok(FlightInfo {
            window: FlightWindow {
                start: parse_datetime(&text(rec, "FLY_START_TIME"), self.offset),
                end: parse_datetime(&text(rec, "FINISHED_TIME"), self.offset),
            },
            manufacturer_code: manufacturer_code(rec),
        })
    }

    /// Fuse device registered for a sonde; empty when none.
    #[instrument(skip(self), fields(repo = "upstream", operation = "fuse_id"))]
    pub async fn fuse_id(&self, tkyid: &str) -> Result<String, FetchError> {
        let records = self
            .query(FUSE_TABLE, &[QueryFilter::eq("SONDECODE", tkyid)], None)
            .await?;
        Ok(records
            .first()
            .map(|rec| text(rec, "FUSECODE"))
            .unwrap_or_default())
    }
}

/// Field as text; numbers are stringified, anything else is empty.
fn text(rec: &Record, key: &str) -> String {
    match rec.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn manufacturer_code(rec: &Record) -> Option<u32> {
    match rec.get("TKY_FIRM")? {
        Value::Number(n) => n.as_u64().and_then(|c| u32::try_from(c).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
