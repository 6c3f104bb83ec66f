//! Shared API types for the billing server

use serde::Serialize;

/// Uniform response envelope for all API endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
