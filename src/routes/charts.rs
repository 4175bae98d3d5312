// Chart endpoints: series as JSON for the web client, base64 images otherwise

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::time::Instant;

use super::{AppState, body_or_default};
use crate::assembler;
use crate::chart::{ChartSpec, device_chart, encode_image, height_chart, profile_chart};
use crate::config::ChartConfig;
use crate::error::AppError;
use crate::models::{ChartRequest, Consumer, DeviceHealthSeries, HeightSeries, ProfileSeries};

/// Decided once per request from the `from` flag.
pub(super) enum ChartReply<T> {
    Json(T),
    Image(String),
}

impl<T: Serialize> IntoResponse for ChartReply<T> {
    fn into_response(self) -> Response {
        match self {
            ChartReply::Json(series) => Json(series).into_response(),
            ChartReply::Image(base64) => base64.into_response(),
        }
    }
}

fn require_ids(req: &ChartRequest) -> Result<(String, String), AppError> {
    let station = req.station.clone().ok_or_else(|| AppError::missing("station"))?;
    let tkyid = req.tkyid.clone().ok_or_else(|| AppError::missing("tkyid"))?;
    Ok((station, tkyid))
}

async fn render(state: &AppState, spec: ChartSpec) -> Result<String, AppError> {
    let renderer = state.renderer.clone();
    let bytes = tokio::task::spawn_blocking(move || renderer.render(&spec))
        .await
        .map_err(anyhow::Error::from)??;
    Ok(encode_image(&bytes))
}

async fn respond<T, F>(
    state: &AppState,
    consumer: Consumer,
    series: T,
    build: F,
) -> Result<ChartReply<T>, AppError>
where
    F: FnOnce(&ChartConfig, &T) -> ChartSpec,
{
    match consumer {
        Consumer::Web => Ok(ChartReply::Json(series)),
        Consumer::Display => {
            let spec = build(&state.config.chart, &series);
            Ok(ChartReply::Image(render(state, spec).await?))
        }
    }
}

/// POST /image
pub(super) async fn profile_image(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<ChartReply<ProfileSeries>, AppError> {
    let req = body_or_default(payload);
    let (station, tkyid) = require_ids(&req)?;
    let kind = req.kind();
    let started = Instant::now();
    let series = assembler::profile(&state.upstream, &station, &tkyid, kind).await;
    tracing::info!(
        %station,
        %tkyid,
        kind = kind.as_str(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "profile series assembled"
    );
    let title = format!("{station} / {tkyid}");
    respond(&state, req.consumer(), series, |chart, s| profile_chart(chart, &title, s)).await
}

/// POST /heightImage
pub(super) async fn height_image(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<ChartReply<HeightSeries>, AppError> {
    let req = body_or_default(payload);
    let (station, tkyid) = require_ids(&req)?;
    let kind = req.kind();
    let started = Instant::now();
    let series = assembler::height(&state.upstream, &station, &tkyid, kind).await;
    tracing::info!(
        %station,
        %tkyid,
        kind = kind.as_str(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "height series assembled"
    );
    let title = format!("{station} / {tkyid} altitude");
    respond(&state, req.consumer(), series, |chart, s| height_chart(chart, &title, s)).await
}

/// POST /deviceInfoImage; always built from raw data.
pub(super) async fn device_info_image(
    State(state): State<AppState>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<ChartReply<DeviceHealthSeries>, AppError> {
    let req = body_or_default(payload);
    let (station, tkyid) = require_ids(&req)?;
    let started = Instant::now();
    let series = assembler::device_health(&state.upstream, &station, &tkyid).await;
    tracing::info!(
        %station,
        %tkyid,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "device health series assembled"
    );
    let title = format!("{station} / {tkyid} device");
    respond(&state, req.consumer(), series, |chart, s| device_chart(chart, &title, s)).await
}
