//! Loan route definitions

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    create_loan, delete_loan, get_loan, get_loan_status, get_outstanding_balance, get_schedule,
};
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans", post(create_loan))
        .route("/api/loans/:loan_id", get(get_loan).delete(delete_loan))
        .route("/api/loans/:loan_id/schedule", get(get_schedule))
        .route("/api/loans/:loan_id/outstanding", get(get_outstanding_balance))
        .route("/api/loans/:loan_id/status", get(get_loan_status))
}
