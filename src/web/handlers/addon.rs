//! Stremio addon resource handlers
//!
//! Each resource is routed twice, with and without the leading configuration
//! segment. Both variants resolve the effective playlist URL and answer from a
//! freshly fetched playlist. Every playlist failure yields the empty shape of
//! the resource, never an error status.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use super::strip_json_suffix;
use crate::models::{CatalogResponse, Manifest, MetaResponse, StreamResponse, ID_PREFIX};
use crate::web::AppState;

pub async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(state.manifest.as_ref().clone())
}

pub async fn manifest_with_config(
    Path(_config): Path<String>,
    State(state): State<AppState>,
) -> Json<Manifest> {
    Json(state.manifest.as_ref().clone())
}

pub async fn catalog(
    Path((content_type, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<CatalogResponse>, StatusCode> {
    answer_catalog(&state, None, &content_type, &id).await
}

pub async fn catalog_with_config(
    Path((config, content_type, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> Result<Json<CatalogResponse>, StatusCode> {
    answer_catalog(&state, Some(&config), &content_type, &id).await
}

pub async fn meta(
    Path((content_type, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<MetaResponse>, StatusCode> {
    answer_meta(&state, None, &content_type, &id).await
}

pub async fn meta_with_config(
    Path((config, content_type, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> Result<Json<MetaResponse>, StatusCode> {
    answer_meta(&state, Some(&config), &content_type, &id).await
}

pub async fn stream(
    Path((content_type, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<StreamResponse>, StatusCode> {
    answer_stream(&state, None, &content_type, &id).await
}

pub async fn stream_with_config(
    Path((config, content_type, id)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> Result<Json<StreamResponse>, StatusCode> {
    answer_stream(&state, Some(&config), &content_type, &id).await
}

async fn answer_catalog(
    state: &AppState,
    config: Option<&str>,
    content_type: &str,
    segment: &str,
) -> Result<Json<CatalogResponse>, StatusCode> {
    let catalog_id = strip_json_suffix(segment).ok_or(StatusCode::NOT_FOUND)?;
    if !state.manifest.serves_catalog(content_type, catalog_id) {
        debug!("Unknown catalog {}/{}", content_type, catalog_id);
        return Ok(Json(CatalogResponse::default()));
    }

    let url = state.resolver.effective_url(config);
    let metas = state.resolver.resolve_catalog(&url).await;
    Ok(Json(CatalogResponse { metas }))
}

async fn answer_meta(
    state: &AppState,
    config: Option<&str>,
    content_type: &str,
    segment: &str,
) -> Result<Json<MetaResponse>, StatusCode> {
    let id = strip_json_suffix(segment).ok_or(StatusCode::NOT_FOUND)?;
    if !id.starts_with(ID_PREFIX) {
        debug!("Meta request for foreign id {}/{}", content_type, id);
        return Ok(Json(MetaResponse::default()));
    }

    let url = state.resolver.effective_url(config);
    let meta = state.resolver.resolve_meta(&url, id).await;
    Ok(Json(MetaResponse { meta }))
}

async fn answer_stream(
    state: &AppState,
    config: Option<&str>,
    content_type: &str,
    segment: &str,
) -> Result<Json<StreamResponse>, StatusCode> {
    let id = strip_json_suffix(segment).ok_or(StatusCode::NOT_FOUND)?;
    if !id.starts_with(ID_PREFIX) {
        debug!("Stream request for foreign id {}/{}", content_type, id);
        return Ok(Json(StreamResponse::default()));
    }

    let url = state.resolver.effective_url(config);
    let streams = state.resolver.resolve_stream(&url, id).await;
    Ok(Json(StreamResponse { streams }))
}
