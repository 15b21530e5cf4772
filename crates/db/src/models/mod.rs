//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response struct safe for API output
//! - `Deserialize` create/update DTOs

pub mod chat;
pub mod message;
pub mod user;
