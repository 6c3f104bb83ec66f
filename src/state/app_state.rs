//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::db::Database;
use crate::loan_service::LoanService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<LoanService>,
    pub database: Database,
}

impl AppState {
    pub fn new(loan_service: Arc<LoanService>, database: Database) -> Self {
        Self {
            loan_service,
            database,
        }
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.database.clone()
    }
}
