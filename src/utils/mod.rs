// Utility functions
pub mod cache;
pub mod error;
pub mod namespace;
pub mod pattern;

pub use cache::*;
pub use error::*;
pub use namespace::*;
pub use pattern::*;
