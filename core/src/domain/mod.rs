//! Domain layer containing the entities carried by signed tokens.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
