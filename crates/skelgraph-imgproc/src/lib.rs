#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// module containing parallelization utilities.
pub mod parallel;

/// operations to frame and unframe images.
pub mod padding;

/// operations to threshold images.
pub mod threshold;
