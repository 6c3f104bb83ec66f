//! Loan billing server library
//!
//! Weekly installment loan billing: amortization schedules, payment
//! recording, outstanding balances, and delinquency tracking, exposed
//! through a small HTTP API.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod loan;
pub mod loan_service;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
