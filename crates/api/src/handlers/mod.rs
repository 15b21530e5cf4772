//! Request handlers, grouped by resource.

pub mod auth;
pub mod chats;
pub mod health;
pub mod messages;
pub mod users;
