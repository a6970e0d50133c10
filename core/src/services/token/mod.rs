//! Identity token service
//!
//! This module handles issuing and verifying the signed identity tokens
//! used to authenticate users across the Signet services:
//! - RS256 signing and verification over the compact JWS form
//! - PEM key loading with role-based optionality (issuer vs. verifier)
//! - Reversible, salt-keyed obfuscation of numeric user ids

mod codec;
mod key_manager;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use codec::SubjectCodec;
pub use key_manager::TokenKeys;
pub use service::TokenService;
