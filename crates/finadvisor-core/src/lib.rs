pub mod advisor;
pub mod config;
pub mod conversation;

// Re-export main types for convenience
pub use advisor::{fallback_response, select_response, Advisor};
pub use config::Config;
pub use conversation::{Conversation, Message, Sender, GREETING};
