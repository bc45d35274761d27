//! Synthetic CPU load generator.
//!
//! Saturates one core for a fixed amount of process CPU time, then settles
//! into a light periodic workload (a short burst of floating point work
//! followed by a 10 ms sleep) that never ends.

pub mod clock;
pub mod error;
pub mod load;
pub mod probe;
pub mod simulator;

pub use error::{Error, Result};
