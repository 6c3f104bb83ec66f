//! Amortization & Delinquency Engine
//!
//! Pure computation over a loan's static terms (principal, start date) and
//! its recorded payment history. Everything here is deterministic: "today"
//! is always an explicit argument, never read from the process clock, and
//! no function touches the database.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

// ============================================================================
// Loan Terms
// ============================================================================

/// Fixed repayment horizon, in weeks.
pub const LOAN_TERM_WEEKS: i32 = 50;

/// Annual interest rate applied once over the full term, in percent.
pub const INTEREST_RATE_PERCENT: i64 = 10;

// ============================================================================
// Amortization
// ============================================================================

/// Total repayment amount: principal plus interest, rounded to cents.
pub fn total_amount(principal: &BigDecimal) -> BigDecimal {
    let gross = principal * BigDecimal::from(100 + INTEREST_RATE_PERCENT) / BigDecimal::from(100);
    gross.round(2)
}

/// Flat weekly payment: total amount spread evenly over the term,
/// rounded to cents.
pub fn weekly_payment(principal: &BigDecimal) -> BigDecimal {
    (total_amount(principal) / BigDecimal::from(LOAN_TERM_WEEKS)).round(2)
}

/// Amount due for a given week of the schedule.
///
/// Weeks 1..49 owe the flat weekly payment. The final week absorbs the
/// rounding remainder so that the 50 installments sum exactly to the total
/// amount; it is floored at zero for sub-cent principals where the flat
/// payment already overshoots the total.
pub fn installment_amount(principal: &BigDecimal, week_number: i32) -> BigDecimal {
    let weekly = weekly_payment(principal);
    if week_number < LOAN_TERM_WEEKS {
        return weekly;
    }

    let final_installment =
        total_amount(principal) - weekly * BigDecimal::from(LOAN_TERM_WEEKS - 1);
    if final_installment < BigDecimal::from(0) {
        BigDecimal::from(0)
    } else {
        final_installment
    }
}

// ============================================================================
// Calendar Time
// ============================================================================

/// 1-based calendar week index since the loan started.
///
/// Week 1 covers the first seven days. The index is clamped to
/// [1, LOAN_TERM_WEEKS]: it never advances past the end of the term, and a
/// start date in the future resolves to week 1.
pub fn current_week(start_date: NaiveDate, today: NaiveDate) -> i32 {
    let days_elapsed = (today - start_date).num_days();
    let week = days_elapsed.div_euclid(7) + 1;
    week.clamp(1, LOAN_TERM_WEEKS as i64) as i32
}

// ============================================================================
// Payment History
// ============================================================================

/// The week number a new payment should be credited to.
///
/// Scans upward from week 1 so a missed week is backfilled before the
/// schedule advances. Returns `None` once all weeks in the term are paid:
/// the loan is fully amortized and no further payment is accepted.
///
/// This is purely a function of recorded payment history; the calendar week
/// plays no part here.
pub fn next_payment_week(paid_weeks: &[i32]) -> Option<i32> {
    let last_paid_week = paid_weeks.iter().copied().max().unwrap_or(0);

    (1..=last_paid_week + 1)
        .find(|week| !paid_weeks.contains(week))
        .filter(|&week| week <= LOAN_TERM_WEEKS)
}

/// Remaining amount owed: total minus everything paid, floored at zero.
pub fn outstanding_balance(principal: &BigDecimal, paid_total: &BigDecimal) -> BigDecimal {
    let balance = total_amount(principal) - paid_total;
    if balance < BigDecimal::from(0) {
        BigDecimal::from(0)
    } else {
        balance
    }
}

// ============================================================================
// Delinquency
// ============================================================================

/// A loan is delinquent when the two most recent calendar weeks are not both
/// covered by a recorded payment. In week 1 there are not yet two weeks to
/// judge, so the loan is never delinquent.
pub fn is_delinquent(current_week: i32, paid_weeks: &[i32]) -> bool {
    if current_week <= 1 {
        return false;
    }

    !(paid_weeks.contains(&current_week) && paid_weeks.contains(&(current_week - 1)))
}
