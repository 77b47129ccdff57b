//! One physical connection to the game service.
//!
//! Opening a [`Session`] spawns two tasks:
//!
//! - [`Reader`]: decodes frames, absorbs echoes listed in the [`Filter`], forwards events
//! - [`Multiplexer`]: sole writer; merges requests, the stop signal and reader events,
//!   and ends the session on the events that close a game
//!
//! The session ends exactly once, with a [`Closure`] explaining why.
mod closure;
mod error;
mod filter;
mod multiplexer;
mod reader;
mod remote;
mod session;
#[cfg(test)]
pub(crate) mod testing;

pub use closure::*;
pub use error::*;
pub use filter::*;
pub use multiplexer::*;
pub use reader::*;
pub use remote::*;
pub use session::*;
