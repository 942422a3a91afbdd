//! # wr-api
//!
//! REST API v1 handlers for Work Radar.
//!
//! Handlers resolve the acting employee from the `x-employee-id` header,
//! run the matching contract or service from the lower layers, and
//! persist through the repositories in wr-db.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
