//! Session policy and supervision.
//!
//! - [`Controller`]: drives one [`crate::connection::Session`]: replay replies,
//!   automatic give-up, echo registration, stop and abort handling
//! - [`Supervisor`]: opens sessions back to back until told to stop or the
//!   service becomes unreachable
//! - [`Link`] / [`Handles`]: the two ends of the channels tying the engine to the
//!   application
mod controller;
mod link;
mod supervisor;

pub use controller::*;
pub use link::*;
pub use supervisor::*;
