//! Asset Catalog Routes
//!
//! The paged listing endpoint. The cursor is opaque to clients: present
//! it verbatim on the next call or omit it to start over. Malformed
//! cursors are accepted and degrade to the legacy raw-token
//! interpretation, so an old bookmark never turns into a 4xx.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{ListAssetsQuery, ListAssetsResponse};
use crate::validation::{parse_filter, resolve_page_size};

/// GET /api/v1/assets - List catalog assets, one page per call
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    tag = "Assets",
    params(ListAssetsQuery),
    responses(
        (status = 200, description = "One page of catalog assets", body = ListAssetsResponse),
        (status = 400, description = "Invalid filter or page size", body = ApiError),
        (status = 503, description = "Object store unavailable", body = ApiError),
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListAssetsQuery>,
) -> ApiResult<Json<ListAssetsResponse>> {
    let filter = parse_filter(&query)?;
    let page_size = resolve_page_size(query.page_size, &state.config)?;

    let page = state
        .catalog
        .list(&filter, query.cursor.as_deref(), page_size)
        .await?;

    tracing::debug!(
        items = page.items.len(),
        has_more = page.has_more,
        "listed catalog page"
    );
    Ok(Json(ListAssetsResponse::from(page)))
}

/// Create the asset router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/assets", get(list_assets))
        .with_state(state)
}
