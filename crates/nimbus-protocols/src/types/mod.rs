//! GitHub entities and request shapes.

mod github;
mod requests;

pub use github::*;
pub use requests::*;
