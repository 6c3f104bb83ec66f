//! Loan API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiError;
use crate::loan::{
    CreateLoanRequest, LoanResponse, LoanStatusResponse, OutstandingBalanceResponse,
    ScheduleResponse,
};
use crate::loan_service::LoanService;
use crate::models::ApiResponse;

/// POST /api/loans - Open a new loan
pub async fn create_loan(
    State(service): State<Arc<LoanService>>,
    Json(request): Json<CreateLoanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoanResponse>>), ApiError> {
    let loan = service.create_loan(request, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data: Some(loan.into()),
            error: None,
        }),
    ))
}

/// GET /api/loans/:loan_id - Loan terms with derived amortization figures
pub async fn get_loan(
    State(service): State<Arc<LoanService>>,
    Path(loan_id): Path<String>,
) -> Result<Json<ApiResponse<LoanResponse>>, ApiError> {
    let loan = service.get_loan(&loan_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(loan.into()),
        error: None,
    }))
}

/// GET /api/loans/:loan_id/schedule - Full 50-week repayment schedule
pub async fn get_schedule(
    State(service): State<Arc<LoanService>>,
    Path(loan_id): Path<String>,
) -> Result<Json<ApiResponse<ScheduleResponse>>, ApiError> {
    let schedule = service.get_schedule(&loan_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(schedule),
        error: None,
    }))
}

/// GET /api/loans/:loan_id/outstanding - Remaining amount owed
pub async fn get_outstanding_balance(
    State(service): State<Arc<LoanService>>,
    Path(loan_id): Path<String>,
) -> Result<Json<ApiResponse<OutstandingBalanceResponse>>, ApiError> {
    let balance = service.outstanding_balance(&loan_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(balance),
        error: None,
    }))
}

/// GET /api/loans/:loan_id/status - Delinquency status
pub async fn get_loan_status(
    State(service): State<Arc<LoanService>>,
    Path(loan_id): Path<String>,
) -> Result<Json<ApiResponse<LoanStatusResponse>>, ApiError> {
    let status = service.get_status(&loan_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(status.into()),
        error: None,
    }))
}

/// DELETE /api/loans/:loan_id - Delete a loan and everything it owns
pub async fn delete_loan(
    State(service): State<Arc<LoanService>>,
    Path(loan_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_loan(&loan_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
