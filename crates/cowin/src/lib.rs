//! # CoWIN
//!
//! This crate provides a client for the public CoWIN appointment API, which reports
//! vaccination centers and their bookable sessions for a pincode or a district.

/// Query shapes for the two calendar endpoints.
mod query;
pub use query::*;

/// Wire types returned by the calendar endpoints.
mod types;
pub use types::*;

/// HTTP client for the calendar endpoints.
mod client;
pub use client::*;

/// Errors raised while talking to the API.
mod error;
pub use error::*;
