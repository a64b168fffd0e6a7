use crate::*;
use askama::Template;
use axum::{extract::{Query, State}, response, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Message shown when either form field is empty after trimming.
pub const MSG_MISSING_INPUT: &str = "请输入菜品名称和 API 密钥";
/// Message shown for any failed search, whatever the underlying cause.
pub const MSG_SEARCH_FAILED: &str = "搜索失败，请检查 API 密钥和网络连接";

// The form asks for a handful of dishes, not the API default.
const FORM_RESULT_COUNT: u32 = 5;

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub api_key: Option<String>,
}

// GET /
pub async fn index(State(app_state): State<Arc<RwLock<AppState>>>) -> response::Html<String> {
    let app_reader = app_state.read().await;
    let template = IndexTemplate::new(&app_reader.results, None);
    response::Html(template.render().unwrap())
}

/// HTML handler for the search form. A successful search replaces the
/// stored result list; a validation or upstream failure leaves it as it
/// was and only adds the localized message to the rendered page.
pub async fn search(
    State(app_state): State<Arc<RwLock<AppState>>>,
    Query(params): Query<SearchParams>,
) -> response::Response {
    let query = params.query.unwrap_or_default();
    let api_key = params.api_key.unwrap_or_default();

    // Presence check happens before any network traffic.
    if search::validate_inputs(&query, &api_key).is_err() {
        let app_reader = app_state.read().await;
        let template =
            IndexTemplate::new(&app_reader.results, Some(MSG_MISSING_INPUT.to_string()));
        return response::Html(template.render().unwrap()).into_response();
    }

    let outcome = {
        let app_reader = app_state.read().await;
        app_reader
            .searcher
            .search_dishes(&query, &api_key, FORM_RESULT_COUNT)
            .await
    };

    match outcome {
        Ok(results) => {
            let mut app_writer = app_state.write().await;
            app_writer.results = results;
            let template = IndexTemplate::new(&app_writer.results, None);
            response::Html(template.render().unwrap()).into_response()
        }
        Err(e) => {
            // The cause goes to the log; the page only gets the generic message.
            log::warn!("dish search failed: {}", e);
            let app_reader = app_state.read().await;
            let template =
                IndexTemplate::new(&app_reader.results, Some(MSG_SEARCH_FAILED.to_string()));
            response::Html(template.render().unwrap()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use mockito::Matcher;
    use tower::ServiceExt;

    fn test_app(base_url: &str, seeded: Vec<SearchResult>) -> (axum::Router, Arc<RwLock<AppState>>) {
        let state = Arc::new(RwLock::new(AppState {
            searcher: SearchClient::with_base_url(base_url),
            results: seeded,
        }));
        let app = axum::Router::new()
            .route("/", axum::routing::get(index))
            .route("/search", axum::routing::get(search))
            .with_state(state.clone());
        (app, state)
    }

    async fn get_page(app: axum::Router, uri: &str) -> String {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn seeded_dish() -> SearchResult {
        SearchResult {
            id: 1,
            title: "Kung Pao Chicken".to_string(),
            image: "http://x/y.jpg".to_string(),
            ready_in_minutes: Some(20),
            servings: Some(4),
        }
    }

    #[tokio::test]
    async fn empty_inputs_skip_the_network_and_show_the_validation_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes/complexSearch")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (app, _state) = test_app(&server.url(), Vec::new());
        let page = get_page(app, "/search?query=&api_key=abc123").await;

        mock.assert_async().await;
        assert!(page.contains(MSG_MISSING_INPUT));
    }

    #[tokio::test]
    async fn successful_search_replaces_the_stored_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/recipes/complexSearch")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results":[{"id":2,"title":"Twice Cooked Pork","image":"http://x/p.jpg","readyInMinutes":35,"servings":2}]}"#,
            )
            .create_async()
            .await;

        let (app, state) = test_app(&server.url(), vec![seeded_dish()]);
        let page = get_page(app, "/search?query=pork&api_key=abc123").await;

        assert!(page.contains("Twice Cooked Pork"));
        assert!(page.contains("35分钟"));
        let app_reader = state.read().await;
        assert_eq!(app_reader.results.len(), 1);
        assert_eq!(app_reader.results[0].id, 2);
    }

    #[tokio::test]
    async fn failed_search_keeps_the_previous_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/recipes/complexSearch")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let (app, state) = test_app(&server.url(), vec![seeded_dish()]);
        let page = get_page(app, "/search?query=pork&api_key=abc123").await;

        assert!(page.contains(MSG_SEARCH_FAILED));
        // The last successful list is still rendered and still stored.
        assert!(page.contains("Kung Pao Chicken"));
        let app_reader = state.read().await;
        assert_eq!(app_reader.results.len(), 1);
        assert_eq!(app_reader.results[0].id, 1);
    }

    #[tokio::test]
    async fn index_renders_the_current_results_without_an_error() {
        let (app, _state) = test_app("http://unused.invalid", vec![seeded_dish()]);
        let page = get_page(app, "/").await;
        assert!(page.contains("Kung Pao Chicken"));
        assert!(!page.contains(MSG_SEARCH_FAILED));
        assert!(!page.contains(MSG_MISSING_INPUT));
    }
}
