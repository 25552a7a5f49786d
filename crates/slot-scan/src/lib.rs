//! # Slot Scan
//!
//! This crate checks vaccination slot availability for a single request. It turns a
//! request into a CoWIN query, filters the returned centers down to eligible sessions,
//! renders the result and hands it to an email service.

/// Request, result and error types for slot checks
mod scan_types;
pub use scan_types::*;

/// Eligibility filtering and projection of API centers
mod filter;
pub use filter::*;

/// Decoding of CLI and event triggers into requests
mod trigger;
pub use trigger::*;

/// HTML rendering of eligible centers
mod render;
pub use render::*;

/// Delivery of rendered notifications
mod notifier;
pub use notifier::*;

/// The fetch, filter and notify pipeline
mod checker;
pub use checker::*;
