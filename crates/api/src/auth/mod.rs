//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session-credential generation and validation.
//! - [`gate`] -- the liveness gate: the single credential check shared by
//!   HTTP requests and WebSocket handshakes.

pub mod gate;
pub mod jwt;
pub mod password;
