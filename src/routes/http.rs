// GET handlers: health text, version

use axum::response::IntoResponse;

use crate::version::{NAME, VERSION};

pub(super) async fn root_handler() -> &'static str {
    "sondeglue is running"
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
