//! Capability traits for the services wired into the registry
//!
//! These traits are the boundary between the token/identity core and
//! the business services that live in the infrastructure crates. Each
//! trait carries a deliberately small surface: enough for consumers to
//! express their dependency, nothing more.

use async_trait::async_trait;

use crate::domain::entities::token::ParsedIdentity;
use crate::errors::ServiceError;

/// Administrative-area lookups
#[async_trait]
pub trait AreaService: Send + Sync {
    /// Resolve the display name for an area code
    async fn area_name(&self, code: &str) -> Result<Option<String>, ServiceError>;
}

/// Outbound SMS delivery
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send a verification code to a phone number
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<(), ServiceError>;
}

/// User accounts and authentication
///
/// Implementations that verify identity tokens receive the token
/// service explicitly at their own construction.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Resolve the identity carried by a signed token
    async fn authenticate(&self, token: &str) -> Result<ParsedIdentity, ServiceError>;
}

/// Stored resources (uploads, assets)
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Resolve the public URL of a stored resource
    async fn resource_url(&self, resource_id: i64) -> Result<Option<String>, ServiceError>;
}

/// Goods catalog
#[async_trait]
pub trait GoodsService: Send + Sync {
    /// Whether the given goods entry is currently in stock
    async fn in_stock(&self, goods_id: i64) -> Result<bool, ServiceError>;
}

/// Order management
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Number of orders placed by a user
    async fn order_count(&self, user_id: i64) -> Result<u64, ServiceError>;
}

/// Capability to obtain a per-domain database handle by logical name
///
/// The handle type is left to the implementation; the core never
/// touches a database itself. Service factories consume this at
/// startup and keep whatever handle they need.
pub trait DatabaseProvider: Send + Sync {
    type Handle;

    /// Obtain the handle for the named logical database
    fn database(&self, name: &str) -> Result<Self::Handle, ServiceError>;
}
