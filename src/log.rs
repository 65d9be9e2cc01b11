//! Conditional logging macros.
//!
//! With the `tracing` feature the inference passes report their decisions
//! (dropped kinds, captured children, detected flow axes) through `tracing`.
//! Without it every macro expands to nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
