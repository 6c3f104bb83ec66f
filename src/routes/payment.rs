//! Payment route definitions

use axum::routing::post;
use axum::Router;

use crate::handlers::record_payment;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new().route("/api/payments", post(record_payment))
}
