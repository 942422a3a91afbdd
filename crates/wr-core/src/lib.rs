//! # wr-core
//!
//! Core types, traits, and utilities for Work Radar.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type aliases
//! - Core traits (Identifiable, Timestamped, UserContext)
//! - Service result types (ServiceResult)
//! - Configuration types

pub mod error;
pub mod result;
pub mod traits;
pub mod config;

pub use error::*;
pub use result::*;
pub use traits::*;
