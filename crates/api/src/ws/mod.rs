//! WebSocket infrastructure for real-time completion updates.
//!
//! Provides the per-list subscriber hub, the wire protocol, heartbeat
//! monitoring, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod hub;
pub mod protocol;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use hub::TodoHub;
