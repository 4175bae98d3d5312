// Shared test helpers: fixture samples and a mock upstream bound on a local port

#![allow(dead_code)]

use axum::{
    Form, Json, Router,
    extract::{Path, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use sondeglue::chart::SvgRenderer;
use sondeglue::config::AppConfig;
use sondeglue::models::Sample;
use sondeglue::routes;
use sondeglue::upstream_repo::UpstreamRepo;

/// Station with a complete flight (sonde T1, fuse F1, manufacturer 7).
pub const STATION: &str = "54511";
pub const TKYID: &str = "T1";
/// Station whose every dataset call fails with HTTP 500.
pub const FAILING_STATION: &str = "FAIL";
/// Station for which the query API answers with a logical error.
pub const BROKEN_STATION: &str = "BROKEN";

pub fn sample(value: Value) -> Sample {
    serde_json::from_value(value).expect("fixture sample")
}

pub fn samples(values: Vec<Value>) -> Vec<Sample> {
    values.into_iter().map(sample).collect()
}

pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig::load_from_str(&format!(
        r#"
[server]
port = 8787
host = "127.0.0.1"

[upstream]
base_url = "{base_url}"
export_url = "{base_url}/export"
request_timeout_secs = 5
"#
    ))
    .expect("test config")
}

pub fn repo(base_url: &str) -> UpstreamRepo {
    UpstreamRepo::new(&test_config(base_url)).expect("upstream repo")
}

pub fn app(base_url: &str) -> Router {
    let config = test_config(base_url);
    let upstream = Arc::new(UpstreamRepo::new(&config).expect("upstream repo"));
    routes::app(upstream, Arc::new(SvgRenderer), config)
}

/// Starts the mock upstream and returns its base URL.
pub async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, mock_router()).await;
    });
    format!("http://{addr}")
}

fn mock_router() -> Router {
    Router::new()
        .route("/api/dataset/view.json", get(dataset))
        .route("/project/{table}", post(query))
        .route("/api/dataset/getSoundingMsg", get(sounding))
        .route("/export", get(export))
}

pub fn qc_fixture() -> Value {
    json!([
        { "seconds": 100, "segmemt": "UP", "temperature": "20.04", "humidity": "50",
          "pressure": "1000", "aboveSeaLevel": "150.5", "longitude": "116.1", "latitude": "39.9" },
        { "seconds": 100, "segmemt": "UP", "temperature": "99" },
        { "seconds": 103, "temperature": 22, "humidity": "99999.000000", "pressure": "NaN",
          "aboveSeaLevel": "0.000000", "longitude": 0, "latitude": "" },
        { "seconds": 104, "segmemt": "DOWN", "temperature": "-5", "humidity": 110,
          "pressure": 990, "aboveSeaLevel": 900 }
    ])
}

pub fn raw_fixture() -> Value {
    json!([
        { "seconds": 100, "temperature": 20, "aboveSeaLevel": "150", "longitude": "116.123456789",
          "latitude": "39.9", "batteryVol": "4.123", "freqz": "403.5004", "rssi": "-80.26",
          "raisingSpeed": 0 },
        { "seconds": 102, "temperature": 21, "aboveSeaLevel": "200.5", "longitude": 116.2,
          "latitude": 40.0, "batteryVol": 4.1, "freqz": 0, "rssi": "", "raisingSpeed": "5.56" }
    ])
}

async fn dataset(Query(params): Query<HashMap<String, String>>) -> Response {
    let station = params.get("station").map(String::as_str).unwrap_or_default();
    let tkyid = params.get("tkyid").map(String::as_str).unwrap_or_default();
    let raw = params.get("type").map(String::as_str) == Some("raw");
    match (station, tkyid) {
        (FAILING_STATION, _) => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        (STATION, TKYID) if raw => Json(json!({ "data": raw_fixture() })).into_response(),
        (STATION, TKYID) => Json(json!({ "data": qc_fixture() })).into_response(),
        _ => Json(json!({ "data": [] })).into_response(),
    }
}

/// Value of the first `{FD, OP, WD}` filter on `field`.
fn filter_value(form: &HashMap<String, String>, field: &str) -> Option<String> {
    let filters: Vec<Value> = serde_json::from_str(form.get("_query_param")?).ok()?;
    filters
        .iter()
        .find(|f| f["FD"] == field)
        .and_then(|f| f["WD"].as_str())
        .map(str::to_string)
}

async fn query(Path(table): Path<String>, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    match table.as_str() {
        "TK_TKY_STAT_DATA.query.do" => {
            let station = filter_value(&form, "STATION_NUMBER").unwrap_or_default();
            match station.as_str() {
                STATION => Json(json!({
                    "_RTN_CODE_": "OK",
                    "_MSG_": "",
                    "_DATA_": [{
                        "TKYID": TKYID,
                        "STATION_NUMBER": STATION,
                        "STATION_NAME": "Beijing",
                        "FLY_START_TIME": "1970-01-01 08:01:40",
                        "FINISHED_TIME": "1970-01-01 08:03:20",
                        "EXPLOSION_TIME": "1970-01-01 08:03:00",
                        "TKY_FIRM": 7
                    }]
                })),
                BROKEN_STATION => Json(json!({ "_RTN_CODE_": "ERROR", "_MSG_": "ERROR: table locked" })),
                _ => Json(json!({ "_RTN_CODE_": "OK", "_DATA_": [] })),
            }
        }
        "TK_SONDE_FUSE.query.do" => {
            let sonde = filter_value(&form, "SONDECODE").unwrap_or_default();
            if sonde == TKYID {
                Json(json!({ "_DATA_": [{ "SONDECODE": TKYID, "FUSECODE": "F1" }] }))
            } else {
                Json(json!({ "_DATA_": [] }))
            }
        }
        _ => Json(json!({ "_RTN_CODE_": "ERROR", "_MSG_": "ERROR: unknown table" })),
    }
}

async fn sounding(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.get("sondeCode").map(String::as_str) != Some("F1") {
        return Json(json!({ "data": {} }));
    }
    Json(json!({
        "data": {
            "k2": { "timeStamp": "1970-01-01 08:01:44", "aboveSeaLevel": 50000 },
            "k1": { "timeStamp": "1970-01-01 08:01:41", "aboveSeaLevel": "120.25" },
            "k3": { "timeStamp": "1970-01-01 08:01:41", "aboveSeaLevel": 999 }
        }
    }))
}

async fn export(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("value").map(String::as_str) {
        Some("S1") => ([(header::CONTENT_TYPE, "text/csv")], "time,height\n1,2\n").into_response(),
        _ => (StatusCode::NOT_FOUND, "no such sonde").into_response(),
    }
}
