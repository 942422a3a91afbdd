//! # wr-contracts
//!
//! Contract validation for Work Radar.
//!
//! Contracts validate entities before create/update operations and check
//! the acting employee's permissions. Services run the matching contract
//! and turn its errors into a failed `ServiceResult`.

pub mod base;
pub mod employees;
pub mod leaves;
pub mod reports;
pub mod tasks;

pub use base::*;
