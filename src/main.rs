// Bring in required crates
use axum::{self, routing};
use clap::Parser;
use tokio::{net, sync::RwLock};
use tower_http::{cors, services, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

// Bring in our local modules
mod api;
mod error;
mod search;
mod templates;
mod web;

use error::*;
use search::*;
use templates::*;

use std::sync::Arc;

/// Command line arguments
#[derive(Parser)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    address: String,
}

pub struct AppState {
    pub searcher: SearchClient,
    pub results: Vec<SearchResult>,
}

// Main server setup
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let state = Arc::new(RwLock::new(AppState {
        searcher: SearchClient::new(),
        results: Vec::new(),
    }));

    // Initialize structured logging and HTTP tracing for Axum with environment-based filtering.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dish_search=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    let trace_layer = trace::TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(tracing::Level::INFO));

    // Versioned JSON API plus the generated OpenAPI document.
    let (api_router, api_doc) = OpenApiRouter::with_openapi(api::ApiDoc::openapi())
        .nest("/api/v1", api::router())
        .split_for_parts();

    // Define MIME type for favicon (.ico file)
    let mime_favicon = "image/vnd.microsoft.icon".parse().unwrap();

    // Create the router
    let app = axum::Router::new()
        .route("/", routing::get(web::index)) // Route for the index page
        .route("/search", routing::get(web::search)) // Route for the search form
        .merge(api_router.layer(cors::CorsLayer::permissive()))
        .with_state(state)
        // API reference UIs backed by the generated OpenAPI document
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", api_doc.clone()).path("/rapidoc"))
        .merge(Redoc::with_url("/redoc", api_doc))
        // Serve static CSS file (must match file path & MIME)
        .route_service(
            "/dishes.css",
            services::ServeFile::new_with_mime(
                "assets/static/dishes.css",
                &mime::TEXT_CSS_UTF_8,
            ),
        )
        // Serve favicon (browser requests this at /favicon.ico)
        .route_service(
            "/favicon.ico",
            services::ServeFile::new_with_mime(
                "assets/static/favicon.ico",
                &mime_favicon,
            ),
        )
        .layer(trace_layer);

    // Bind to the requested address
    let listener = net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}

// Entry point of the app
#[tokio::main]
async fn main() {
    // If serve() returns an error, log and exit
    if let Err(err) = serve().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
