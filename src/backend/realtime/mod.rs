//! Real-time Update System
//!
//! Per-user event delivery for the chat WebSocket.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports and documentation
//! ├── broadcast.rs  - Channel type and send helper
//! └── hub.rs        - ChatHub: one channel per connected user
//! ```
//!
//! # Event Types
//!
//! - **Message** - a chat message was stored
//! - **Typing** - the other participant started or stopped typing
//! - **Notification** - an offer arrived or was decided
//! - **Status** - connection status and pong replies
//! - **Error** - a client frame was rejected

pub mod broadcast;
pub mod hub;

pub use broadcast::{broadcast_event, RealtimeEventBroadcast};
pub use hub::ChatHub;
