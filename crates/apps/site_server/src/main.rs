use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use records::{NewSiteRecord, RecordStore};

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    store: Arc<RecordStore>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let site_root = PathBuf::from(env::var("SITE_ROOT").unwrap_or_else(|_| ".".to_string()));
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("invalid PORT");
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    // The catalog is loaded and validated once at startup; a server that
    // cannot produce its primary page fails fast, like a store that cannot
    // open its table.
    let catalog_path = site_root.join("data").join("excavations.json");
    let catalog = match load_catalog(&catalog_path) {
        Ok(c) => c,
        Err(err) => {
            error!("failed to load catalog {}: {err}", catalog_path.display());
            std::process::exit(1);
        }
    };
    info!(projects = catalog.len(), "excavation catalog loaded");

    let db_path = site_root.join("data").join("site-records.db");
    let store = match RecordStore::open(&db_path) {
        Ok(s) => s,
        Err(err) => {
            error!("failed to open site record store {}: {err}", db_path.display());
            std::process::exit(1);
        }
    };

    let state = AppState {
        catalog: Arc::new(catalog),
        store: Arc::new(store),
    };

    let app = router(state)
        .route_service("/", ServeFile::new(site_root.join("index.html")))
        .nest_service("/assets", ServeDir::new(site_root.join("assets")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("site server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let payload = std::fs::read_to_string(path)?;
    Ok(Catalog::from_json(&payload)?)
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/data/excavations.json", get(get_catalog))
        .route(
            "/api/site-records",
            post(create_site_record).get(list_site_records),
        )
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_catalog(State(state): State<AppState>) -> Response {
    Json(state.catalog.as_ref()).into_response()
}

async fn create_site_record(
    State(state): State<AppState>,
    Json(payload): Json<NewSiteRecord>,
) -> Response {
    let missing = payload.missing_required();
    if !missing.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing required fields",
                "details": missing,
            })),
        )
            .into_response();
    }

    match state.store.insert(&payload) {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(err) => {
            error!("failed to store site record: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to store site record" })),
            )
                .into_response()
        }
    }
}

async fn list_site_records(State(state): State<AppState>) -> Response {
    match state.store.list() {
        Ok(records) => Json(records).into_response(),
        Err(err) => {
            error!("failed to fetch site records: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch site records" })),
            )
                .into_response()
        }
    }
}
