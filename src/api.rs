use crate::*;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// OpenAPI doc container
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "dish-search", description = "Dish image search REST API")
    )
)]
pub struct ApiDoc;

/// Utoipa-compatible router with documented routes
pub fn router() -> OpenApiRouter<Arc<RwLock<AppState>>> {
    OpenApiRouter::new().routes(routes!(search))
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApiSearchParams {
    /// Free-text dish name
    pub query: Option<String>,
    /// Spoonacular API key
    pub api_key: Option<String>,
    /// Result cap, defaults to 10
    pub number: Option<u32>,
}

/// Search dishes and return the mapped results as JSON
#[utoipa::path(
    get,
    path = "/search",
    params(ApiSearchParams),
    responses(
        (status = 200, description = "Mapped search results", body = [SearchResult]),
        (status = 400, description = "Missing dish name or API key"),
        (status = 502, description = "Upstream search request failed"),
    )
)]
pub async fn search(
    State(app_state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<ApiSearchParams>,
) -> Result<Json<Vec<SearchResult>>, StatusCode> {
    let query = params.query.unwrap_or_default();
    let api_key = params.api_key.unwrap_or_default();
    if search::validate_inputs(&query, &api_key).is_err() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let number = params.number.unwrap_or(search::DEFAULT_MAX_RESULTS);
    let app_reader = app_state.read().await;
    match app_reader.searcher.search_dishes(&query, &api_key, number).await {
        Ok(results) => Ok(Json(results)),
        Err(e) => {
            log::warn!("api dish search failed: {}", e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}
