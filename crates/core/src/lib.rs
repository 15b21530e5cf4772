//! Chatline domain core.
//!
//! Pure types and logic shared by every other crate in the workspace:
//!
//! - [`types`] -- database id and timestamp aliases.
//! - [`error`] -- the domain error taxonomy ([`error::CoreError`]).
//! - [`session`] -- the single-active-session state machine and the
//!   credential rejection taxonomy ([`session::AuthRejection`]).
//!
//! This crate has no I/O; persistence and transport live in `chatline-db`
//! and `chatline-api`.

pub mod error;
pub mod session;
pub mod types;
