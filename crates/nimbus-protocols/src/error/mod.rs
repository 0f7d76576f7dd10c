//! Error types for the nimbus protocol layer.

mod payload;
mod tracker;

pub use payload::*;
pub use tracker::*;
