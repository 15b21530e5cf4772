//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- runs the liveness gate against the request's
//!   credential (Bearer header or cookie).

pub mod auth;
