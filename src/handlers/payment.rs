//! Payment API handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiError;
use crate::loan::{Payment, RecordPaymentRequest};
use crate::loan_service::LoanService;
use crate::models::ApiResponse;

/// POST /api/payments - Record the next weekly payment for a loan
///
/// The caller supplies only the loan identifier; the amount and the week the
/// payment is credited to are derived from the loan's schedule.
pub async fn record_payment(
    State(service): State<Arc<LoanService>>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    let payment = service.record_payment(request, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data: Some(payment),
            error: None,
        }),
    ))
}
