//! Loan service layer - billing workflows over the loan aggregate
//!
//! Every mutation runs as a single transaction: a payment and its delinquency
//! refresh commit together or not at all.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::loan::{
    CreateLoanRequest, Loan, LoanStatus, OutstandingBalanceResponse, Payment,
    RecordPaymentRequest, ScheduleResponse, ScheduleWeek,
};
use crate::services::amortization;

/// Loan service for managing the loan lifecycle
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Open a new loan and its delinquency status record
    pub async fn create_loan(&self, request: CreateLoanRequest, now: DateTime<Utc>) -> ApiResult<Loan> {
        request.validate()?;

        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (id, loan_id, principal_amount, start_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.loan_id)
        .bind(&request.principal_amount)
        .bind(now.date_naive())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("Loan '{}' already exists", request.loan_id))
            } else {
                ApiError::from(e)
            }
        })?;

        sqlx::query("INSERT INTO loan_statuses (loan_id, is_delinquent, last_updated) VALUES ($1, $2, $3)")
            .bind(loan.id)
            .bind(false)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(loan_id = %loan.loan_id, principal = %loan.principal_amount, "Loan created");

        Ok(loan)
    }

    /// Get a loan by its external identifier
    pub async fn get_loan(&self, loan_id: &str) -> ApiResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE loan_id = $1")
            .bind(loan_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Loan '{}' not found", loan_id)))?;

        Ok(loan)
    }

    /// Full 50-week repayment schedule with per-week payment state
    pub async fn get_schedule(&self, loan_id: &str) -> ApiResult<ScheduleResponse> {
        let loan = self.get_loan(loan_id).await?;

        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE loan_id = $1 ORDER BY week_number",
        )
        .bind(loan.id)
        .fetch_all(&self.db_pool)
        .await?;

        let schedule = (1..=amortization::LOAN_TERM_WEEKS)
            .map(|week| {
                let payment = payments.iter().find(|p| p.week_number == week);
                ScheduleWeek {
                    week_number: week,
                    due_amount: amortization::installment_amount(&loan.principal_amount, week),
                    paid: payment.is_some(),
                    payment_date: payment.map(|p| p.payment_date),
                }
            })
            .collect();

        Ok(ScheduleResponse {
            loan_id: loan.loan_id,
            schedule,
        })
    }

    /// Remaining amount owed on a loan
    pub async fn outstanding_balance(&self, loan_id: &str) -> ApiResult<OutstandingBalanceResponse> {
        let loan = self.get_loan(loan_id).await?;

        let paid_total =
            sqlx::query_scalar::<_, Option<BigDecimal>>("SELECT SUM(amount) FROM payments WHERE loan_id = $1")
                .bind(loan.id)
                .fetch_one(&self.db_pool)
                .await?
                .unwrap_or_else(|| BigDecimal::from(0));

        Ok(OutstandingBalanceResponse {
            outstanding_balance: amortization::outstanding_balance(&loan.principal_amount, &paid_total),
            loan_id: loan.loan_id,
        })
    }

    /// Record the next weekly payment for a loan
    ///
    /// The payment is credited to the earliest unpaid week (a missed week is
    /// backfilled before the schedule advances), while duplicate detection
    /// guards the calendar week: one submission per calendar week, even when
    /// older weeks remain unpaid. The delinquency flag is recomputed in the
    /// same transaction.
    pub async fn record_payment(&self, request: RecordPaymentRequest, now: DateTime<Utc>) -> ApiResult<Payment> {
        request.validate()?;

        let mut tx = self.db_pool.begin().await?;

        // Lock the loan row to serialize concurrent submissions.
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE loan_id = $1 FOR UPDATE")
            .bind(&request.loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Loan '{}' not found", request.loan_id)))?;

        let paid_weeks = sqlx::query_scalar::<_, i32>(
            "SELECT week_number FROM payments WHERE loan_id = $1 ORDER BY week_number",
        )
        .bind(loan.id)
        .fetch_all(&mut *tx)
        .await?;

        let next_week =
            amortization::next_payment_week(&paid_weeks).ok_or(ApiError::AlreadyPaidOff)?;

        let current_week = amortization::current_week(loan.start_date, now.date_naive());
        if paid_weeks.contains(&current_week) {
            return Err(ApiError::DuplicatePayment(current_week));
        }

        let amount = amortization::installment_amount(&loan.principal_amount, next_week);

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, loan_id, amount, week_number, payment_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(loan.id)
        .bind(&amount)
        .bind(next_week)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!(
                    "Payment for week {} was recorded concurrently",
                    next_week
                ))
            } else {
                ApiError::from(e)
            }
        })?;

        let mut weeks = paid_weeks;
        weeks.push(next_week);
        let is_delinquent = amortization::is_delinquent(current_week, &weeks);

        // last_updated is refreshed even when the flag does not change.
        sqlx::query("UPDATE loan_statuses SET is_delinquent = $1, last_updated = $2 WHERE loan_id = $3")
            .bind(is_delinquent)
            .bind(now)
            .bind(loan.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan.loan_id,
            week = payment.week_number,
            amount = %payment.amount,
            delinquent = is_delinquent,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Delinquency status of a loan
    pub async fn get_status(&self, loan_id: &str) -> ApiResult<LoanStatus> {
        let status = sqlx::query_as::<_, LoanStatus>(
            r#"
            SELECT s.loan_id, s.is_delinquent, s.last_updated
            FROM loan_statuses s
            JOIN loans l ON l.id = s.loan_id
            WHERE l.loan_id = $1
            "#,
        )
        .bind(loan_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Loan '{}' not found", loan_id)))?;

        Ok(status)
    }

    /// Delete a loan together with its payments and status
    ///
    /// The loan owns its payments and status record; all three are removed
    /// explicitly in one transaction.
    pub async fn delete_loan(&self, loan_id: &str) -> ApiResult<()> {
        let mut tx = self.db_pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE loan_id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Loan '{}' not found", loan_id)))?;

        sqlx::query("DELETE FROM payments WHERE loan_id = $1")
            .bind(loan.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM loan_statuses WHERE loan_id = $1")
            .bind(loan.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(loan.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(loan_id = %loan.loan_id, "Loan deleted");

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
