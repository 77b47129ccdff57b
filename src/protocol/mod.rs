//! Wire protocol spoken by the game service.
//!
//! Inbound frames are `{"MessageType": tag, "Data": payload}` envelopes that
//! decode into the closed [`Event`] sum type. Outbound frames are
//! `{"MessageType": tag, "Value": payload}` envelopes built from [`Request`].
mod envelope;
mod error;
mod event;
mod mood;
mod payload;
mod request;
mod tag;

pub use envelope::*;
pub use error::*;
pub use event::*;
pub use mood::*;
pub use payload::*;
pub use request::*;
pub use tag::*;
