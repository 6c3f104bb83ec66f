//! Loan billing server
//!
//! HTTP server for weekly installment loan billing: loan creation, repayment
//! schedules, outstanding balances, payment recording, and delinquency
//! status.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use billing_server::config::Config;
use billing_server::db::{self, Database};
use billing_server::loan_service::LoanService;
use billing_server::middleware;
use billing_server::routes;
use billing_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting billing server");

    // Initialize database connection pool and schema
    let db_pool = match db::create_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::run_migrations(&db_pool).await {
        tracing::error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    // Create shared app state
    let loan_service = Arc::new(LoanService::new(db_pool.clone()));
    let database = Database::new(db_pool);
    let app_state = AppState::new(loan_service, database);

    // Create the app router
    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::api_routes())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(configure_cors(&config));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

async fn root() -> &'static str {
    "Loan Billing API Server"
}

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: String,
    database: String,
    version: String,
}

/// Health check endpoint
async fn health_check(State(database): State<Database>) -> Json<HealthResponse> {
    let healthy = database.is_healthy().await;

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: if healthy { "connected" } else { "error" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn configure_cors(config: &Config) -> CorsLayer {
    let Some(origins_str) = config.cors_allowed_origins.as_deref() else {
        if config.environment.is_production() {
            tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        }
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
