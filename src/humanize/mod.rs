//! Telling humans from machines, in both directions.
//!
//! - [`Timings`] / [`classify`]: flag a partner whose keystrokes are too regular
//! - [`Typist`]: make our own propositions look hand-typed
mod detector;
mod typist;

pub use detector::*;
pub use typist::*;
