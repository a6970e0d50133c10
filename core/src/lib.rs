//! # Signet Core
//!
//! Core domain layer for the Signet backend. This crate contains the
//! identity token service (issuing and verifying signed tokens that
//! carry an obfuscated user identifier and an opaque payload), the
//! service capability seams, and the error types shared across the
//! server crates.

pub mod domain;
pub mod errors;
pub mod registry;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use registry::*;
pub use services::*;
