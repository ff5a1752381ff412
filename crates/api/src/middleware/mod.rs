//! Authentication extractors.
//!
//! - [`auth::OptionalAuth`] -- Identifies the viewer from a JWT Bearer token,
//!   accepting anonymous requests and rejecting bad tokens.

pub mod auth;
