//! Loan, payment, and delinquency-status models for the billing API

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::services::amortization;

/// Loan terms. Immutable after creation; the start date is set by the server
/// when the loan is opened.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub loan_id: String,
    pub principal_amount: BigDecimal,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recorded weekly repayment. Append-only: payments are never updated or
/// deleted on their own, only together with their loan.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub loan_id: Uuid,
    pub amount: BigDecimal,
    pub week_number: i32,
    pub payment_date: DateTime<Utc>,
}

/// Delinquency flag, one-to-one with a loan
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoanStatus {
    pub loan_id: Uuid,
    pub is_delinquent: bool,
    pub last_updated: DateTime<Utc>,
}

/// Request to create a new loan
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    #[validate(length(min = 1, max = 50))]
    pub loan_id: String,
    #[validate(custom = "non_negative_principal")]
    pub principal_amount: BigDecimal,
}

/// Request to record a payment. The amount and week number are never
/// caller-supplied; both are derived server-side from the loan's schedule.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    #[validate(length(min = 1, max = 50))]
    pub loan_id: String,
}

fn non_negative_principal(value: &BigDecimal) -> Result<(), ValidationError> {
    if value < &BigDecimal::from(0) {
        return Err(ValidationError::new("principal_amount must not be negative"));
    }
    Ok(())
}

/// Loan terms plus the derived amortization figures
#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub loan_id: String,
    pub principal_amount: BigDecimal,
    pub start_date: NaiveDate,
    pub total_amount: BigDecimal,
    pub weekly_payment: BigDecimal,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        let total_amount = amortization::total_amount(&loan.principal_amount);
        let weekly_payment = amortization::weekly_payment(&loan.principal_amount);
        Self {
            loan_id: loan.loan_id,
            principal_amount: loan.principal_amount,
            start_date: loan.start_date,
            total_amount,
            weekly_payment,
        }
    }
}

/// One entry of the 50-week repayment schedule
#[derive(Debug, Serialize)]
pub struct ScheduleWeek {
    pub week_number: i32,
    pub due_amount: BigDecimal,
    pub paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
}

/// Full repayment schedule for a loan
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub loan_id: String,
    pub schedule: Vec<ScheduleWeek>,
}

/// Remaining amount owed on a loan
#[derive(Debug, Serialize)]
pub struct OutstandingBalanceResponse {
    pub loan_id: String,
    pub outstanding_balance: BigDecimal,
}

/// Delinquency status of a loan
#[derive(Debug, Serialize)]
pub struct LoanStatusResponse {
    pub is_delinquent: bool,
    pub last_updated: DateTime<Utc>,
}

impl From<LoanStatus> for LoanStatusResponse {
    fn from(status: LoanStatus) -> Self {
        Self {
            is_delinquent: status.is_delinquent,
            last_updated: status.last_updated,
        }
    }
}
