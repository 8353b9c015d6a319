//! Chat Handlers
//!
//! - **`rest`** - chats and messages over plain HTTP
//! - **`socket`** - the real-time WebSocket

pub mod rest;
pub mod socket;

pub use rest::{create_chat, get_chat, list_chats, list_messages, mark_read, send_message};
pub use socket::chat_socket;
