// HTTP routes: chart images, dataset endpoints, health and version

mod charts;
mod dataset;
mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::chart::ChartRenderer;
use crate::config::AppConfig;
use crate::upstream_repo::UpstreamRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) upstream: Arc<UpstreamRepo>,
    pub(crate) renderer: Arc<dyn ChartRenderer>,
    pub(crate) config: AppConfig,
}

pub fn app(upstream: Arc<UpstreamRepo>, renderer: Arc<dyn ChartRenderer>, config: AppConfig) -> Router {
    let state = AppState {
        upstream,
        renderer,
        config,
    };
    Router::new()
        .route("/", get(http::root_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/image", post(charts::profile_image)) // POST /image
        .route("/heightImage", post(charts::height_image)) // POST /heightImage
        .route("/deviceInfoImage", post(charts::device_info_image)) // POST /deviceInfoImage
        .route(
            "/api/node/dataset/gethistoryline",
            post(dataset::history_line),
        )
        .route(
            "/api/node/dataset/sondedataforecharts",
            post(dataset::sonde_data_for_charts),
        )
        .route(
            "/api/node/dataset/exportsondedata",
            get(dataset::export_sonde_data),
        )
        .layer(CompressionLayer::new())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Request body, or an empty one when it is missing or not valid JSON; the
/// parameter checks then report what is absent.
fn body_or_default<T: Default>(
    payload: Result<axum::Json<T>, axum::extract::rejection::JsonRejection>,
) -> T {
    match payload {
        Ok(axum::Json(body)) => body,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable request body");
            T::default()
        }
    }
}
