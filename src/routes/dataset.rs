// Dataset endpoints: history map, chart-data records, export passthrough

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Instant;

use super::{AppState, body_or_default};
use crate::assembler::{self, parse_stations, requested_kinds};
use crate::error::AppError;
use crate::models::{ChartDataRequest, ExportQuery, HistoryRequest};

/// POST /api/node/dataset/gethistoryline
pub(super) async fn history_line(
    State(state): State<AppState>,
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let req = body_or_default(payload);
    let stations = match req.stations {
        Some(Value::String(raw)) => parse_stations(&raw),
        _ => Vec::new(),
    };
    if stations.is_empty() {
        return Err(AppError::missing("stations"));
    }
    let started = Instant::now();
    let count = stations.len();
    let merged = assembler::history_lines(&state.upstream, stations)
        .await
        .map_err(anyhow::Error::from)?;
    tracing::info!(
        stations = count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "history lines assembled"
    );
    Ok(Json(merged))
}

/// POST /api/node/dataset/sondedataforecharts
pub(super) async fn sonde_data_for_charts(
    State(state): State<AppState>,
    payload: Result<Json<ChartDataRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<&'static str, Value>>, AppError> {
    let req = body_or_default(payload);
    let station = req.station.ok_or_else(|| AppError::missing("station"))?;
    let tkyid = req.tkyid.ok_or_else(|| AppError::missing("tkyid"))?;
    let kinds = requested_kinds(req.res_type.as_deref());
    let started = Instant::now();
    let data = assembler::chart_data(&state.upstream, &station, &tkyid, kinds).await;
    tracing::info!(
        %station,
        %tkyid,
        kinds = data.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "chart data assembled"
    );
    Ok(Json(data))
}

/// GET /api/node/dataset/exportsondedata; relays the export service's status and body.
pub(super) async fn export_sonde_data(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let sonde_code = query
        .sonde_code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::missing("sondeCode"))?;
    let export = state
        .upstream
        .export(&sonde_code)
        .await
        .map_err(anyhow::Error::from)?;
    tracing::info!(%sonde_code, status = export.status.as_u16(), "export relayed");
    let mut resp = (export.status, export.body).into_response();
    if let Some(content_type) = export.content_type {
        resp.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(resp)
}
