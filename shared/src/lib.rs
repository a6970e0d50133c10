//! Shared configuration types for the Signet backend
//!
//! This crate provides the configuration structures consumed by the
//! server crates. Configuration is constructed once at process start,
//! either from a deserialized config file or from environment variables,
//! and treated as read-only afterwards.

pub mod config;

// Re-export commonly used items at crate root
pub use config::TokenConfig;
