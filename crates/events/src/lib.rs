//! Chatline realtime infrastructure.
//!
//! - [`ServerEvent`] -- the canonical event envelope pushed to clients over
//!   the realtime channel.
//! - [`ConnectionDirectory`] -- the injectable `user id -> live connection`
//!   mapping, with [`InMemoryDirectory`] as the single-process impl.
//! - [`RevocationNotifier`] -- pushes cross-device session revocations to the
//!   superseded connection.

pub mod directory;
pub mod event;
pub mod notifier;

pub use directory::{ConnectionDirectory, EventSender, InMemoryDirectory};
pub use event::ServerEvent;
pub use notifier::RevocationNotifier;
