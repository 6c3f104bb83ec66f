//! Amortization & Delinquency Engine Tests
//!
//! These tests validate the billing math and scheduling rules with various
//! scenarios including rounding edge cases, missed-week backfill, and the
//! two-consecutive-weeks delinquency rule.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use billing_server::services::amortization::{
    current_week, installment_amount, is_delinquent, next_payment_week, outstanding_balance,
    total_amount, weekly_payment, LOAN_TERM_WEEKS,
};

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Amortization Tests
// ============================================================================

#[test]
fn test_total_amount_million_principal() {
    assert_eq!(total_amount(&dec("1000000")), dec("1100000.00"));
}

#[test]
fn test_weekly_payment_million_principal() {
    assert_eq!(weekly_payment(&dec("1000000")), dec("22000.00"));
}

#[test]
fn test_total_amount_zero_principal() {
    assert_eq!(total_amount(&dec("0")), dec("0"));
    assert_eq!(weekly_payment(&dec("0")), dec("0"));
}

#[test]
fn test_total_amount_rounds_to_cents() {
    // 33.33 * 1.10 = 36.663, rounds down to 36.66
    assert_eq!(total_amount(&dec("33.33")), dec("36.66"));
}

#[test]
fn test_weekly_payment_rounds_to_cents() {
    // 36.66 / 50 = 0.7332, rounds down to 0.73
    assert_eq!(weekly_payment(&dec("33.33")), dec("0.73"));

    // 1.10 / 50 = 0.022, rounds down to 0.02
    assert_eq!(weekly_payment(&dec("1.00")), dec("0.02"));
}

#[test]
fn test_installment_amount_flat_until_final_week() {
    let principal = dec("33.33");
    let weekly = weekly_payment(&principal);

    for week in 1..LOAN_TERM_WEEKS {
        assert_eq!(installment_amount(&principal, week), weekly);
    }
}

#[test]
fn test_final_installment_absorbs_rounding_remainder() {
    // total 36.66, weekly 0.73; 49 flat installments leave 0.89 for week 50
    assert_eq!(installment_amount(&dec("33.33"), LOAN_TERM_WEEKS), dec("0.89"));
}

#[test]
fn test_installments_sum_to_total_amount() {
    let principal = dec("33.33");
    let sum = (1..=LOAN_TERM_WEEKS).fold(BigDecimal::from(0), |acc, week| {
        acc + installment_amount(&principal, week)
    });

    assert_eq!(sum, total_amount(&principal));
}

#[test]
fn test_final_installment_never_negative() {
    // total 0.44, weekly 0.01; 49 flat installments already overshoot,
    // so the final week owes nothing rather than a negative amount
    assert_eq!(installment_amount(&dec("0.40"), LOAN_TERM_WEEKS), dec("0"));
}

// ============================================================================
// Calendar Week Tests
// ============================================================================

#[test]
fn test_current_week_starts_at_one() {
    let start = date(2024, 1, 1);
    assert_eq!(current_week(start, date(2024, 1, 1)), 1);
    assert_eq!(current_week(start, date(2024, 1, 7)), 1);
}

#[test]
fn test_current_week_advances_every_seven_days() {
    let start = date(2024, 1, 1);
    assert_eq!(current_week(start, date(2024, 1, 8)), 2);
    assert_eq!(current_week(start, date(2024, 1, 14)), 2);
    assert_eq!(current_week(start, date(2024, 1, 15)), 3);
}

#[test]
fn test_current_week_clamped_at_term_end() {
    let start = date(2024, 1, 1);

    // 343 days elapsed is exactly the start of week 50
    assert_eq!(current_week(start, date(2024, 12, 9)), 50);

    // Far past the end of the term the index stays at 50
    assert_eq!(current_week(start, date(2030, 1, 1)), 50);
}

#[test]
fn test_current_week_future_start_date() {
    // A loan that has not started yet resolves to week 1
    assert_eq!(current_week(date(2024, 6, 1), date(2024, 5, 1)), 1);
}

#[test]
fn test_current_week_monotonic_and_bounded() {
    let start = date(2024, 1, 1);
    let mut previous = 0;

    for days in 0..400 {
        let week = current_week(start, start + chrono::Duration::days(days));
        assert!(week >= previous, "Week index must never decrease");
        assert!((1..=LOAN_TERM_WEEKS).contains(&week));
        previous = week;
    }
}

// ============================================================================
// Next Payable Week Tests
// ============================================================================

#[test]
fn test_next_payment_week_new_loan() {
    assert_eq!(next_payment_week(&[]), Some(1));
}

#[test]
fn test_next_payment_week_backfills_missed_week() {
    // Weeks 1..5 paid except week 3: the gap is filled before advancing
    assert_eq!(next_payment_week(&[1, 2, 4, 5]), Some(3));
}

#[test]
fn test_next_payment_week_backfills_from_the_start() {
    assert_eq!(next_payment_week(&[2, 3]), Some(1));
    assert_eq!(next_payment_week(&[50]), Some(1));
}

#[test]
fn test_next_payment_week_advances_when_contiguous() {
    assert_eq!(next_payment_week(&[1, 2, 3]), Some(4));
}

#[test]
fn test_next_payment_week_reaches_final_week() {
    let paid: Vec<i32> = (1..LOAN_TERM_WEEKS).collect();
    assert_eq!(next_payment_week(&paid), Some(50));
}

#[test]
fn test_next_payment_week_fully_paid_loan() {
    let paid: Vec<i32> = (1..=LOAN_TERM_WEEKS).collect();
    assert_eq!(next_payment_week(&paid), None);
}

// ============================================================================
// Outstanding Balance Tests
// ============================================================================

#[test]
fn test_outstanding_balance_no_payments() {
    assert_eq!(
        outstanding_balance(&dec("1000000"), &dec("0")),
        dec("1100000.00")
    );
}

#[test]
fn test_outstanding_balance_after_five_payments() {
    assert_eq!(
        outstanding_balance(&dec("1000000"), &dec("110000")),
        dec("990000.00")
    );
}

#[test]
fn test_outstanding_balance_floors_at_zero() {
    // Payments exceeding the total never report a negative balance
    assert_eq!(outstanding_balance(&dec("1000000"), &dec("1200000")), dec("0"));
}

#[test]
fn test_outstanding_balance_zero_principal() {
    assert_eq!(outstanding_balance(&dec("0"), &dec("0")), dec("0"));
}

// ============================================================================
// Delinquency Tests
// ============================================================================

#[test]
fn test_not_delinquent_in_first_week() {
    // Too early to judge, with or without payments
    assert!(!is_delinquent(1, &[]));
    assert!(!is_delinquent(1, &[1]));
}

#[test]
fn test_not_delinquent_when_last_two_weeks_paid() {
    assert!(!is_delinquent(2, &[1, 2]));
    assert!(!is_delinquent(5, &[4, 5]));
    assert!(!is_delinquent(50, &[49, 50]));
}

#[test]
fn test_delinquent_when_current_week_unpaid() {
    assert!(is_delinquent(5, &[4]));
}

#[test]
fn test_delinquent_when_previous_week_unpaid() {
    assert!(is_delinquent(5, &[5]));
}

#[test]
fn test_delinquent_when_both_recent_weeks_unpaid() {
    assert!(is_delinquent(5, &[]));
    assert!(is_delinquent(5, &[1, 2, 3]));
}

#[test]
fn test_delinquency_ignores_older_gaps() {
    // Week 1 was never paid, but the two most recent weeks are covered
    assert!(!is_delinquent(4, &[3, 4]));
}
