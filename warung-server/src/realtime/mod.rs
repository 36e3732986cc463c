//! Realtime Module
//!
//! Role-scoped event fan-out to connected staff clients, plus presence
//! tracking for the admin screen.

pub mod events;
pub mod hub;
pub mod presence;

pub use events::{ClientEvent, ServerEvent};
pub use hub::{Group, Hub};
pub use presence::PresenceTracker;
