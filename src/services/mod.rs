//! Business logic services for the billing server

pub mod amortization;
