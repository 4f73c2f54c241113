use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use todo_api_rust::auth::TokenVerifier;
use todo_api_rust::config::AppConfig;
use todo_api_rust::database;
use todo_api_rust::handlers::tasks;
use todo_api_rust::middleware::require_auth;
use todo_api_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting To-Do API in {:?} mode", config.environment);

    // The pool connects lazily, so a database that is still coming up does
    // not keep the server from binding
    let pool = database::pool::create_pool(&config.database)?;
    if let Err(e) = database::pool::ensure_schema(&pool).await {
        tracing::warn!("schema bootstrap failed, will rely on existing schema: {}", e);
    }

    let verifier = TokenVerifier::new(&config.security);
    let state = AppState::new(pool, verifier);

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("To-Do API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected task API
        .merge(task_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn task_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Collection operations
        .route("/api/tasks", get(tasks::task_list).post(tasks::task_create))
        // Single-record operations
        .route(
            "/api/tasks/:id",
            put(tasks::task_update).delete(tasks::task_delete),
        )
        // Every route above requires a verified bearer token
        .route_layer(axum::middleware::from_fn_with_state(state, require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "To-Do API (Rust)",
        "version": version,
        "description": "Multi-user task list backend built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "tasks": "/api/tasks[/:id] (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::pool::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
