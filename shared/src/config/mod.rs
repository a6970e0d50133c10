//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `token` - Identity token issuing and verification configuration

pub mod token;

// Re-export commonly used types
pub use token::TokenConfig;
