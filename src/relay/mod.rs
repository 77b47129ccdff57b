//! The chat-facing application around the bridge.
//!
//! Operators drive the bot with `!` commands and word propositions; every
//! notice from the bridge is rendered back as a chat line.
mod chat;
mod command;
mod host;
mod stats;
mod throttle;

pub use chat::*;
pub use command::*;
pub use host::*;
pub use stats::*;
pub use throttle::*;
