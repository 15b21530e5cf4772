//! WebSocket infrastructure for real-time communication.
//!
//! The HTTP upgrade handler runs the same liveness gate as REST requests;
//! connections are tracked in the shared [`chatline_events::ConnectionDirectory`].

mod handler;

pub use handler::ws_handler;
