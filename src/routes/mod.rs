//! Route definitions for the billing API

mod loan;
mod payment;

pub use loan::loan_routes;
pub use payment::payment_routes;

use axum::Router;

use crate::state::AppState;

/// All API routes merged into one router
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(loan_routes()).merge(payment_routes())
}
