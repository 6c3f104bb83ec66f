//! API handlers for the billing server

pub mod loan;
pub mod payment;

pub use loan::*;
pub use payment::*;
