//! Service wiring for the Signet backend
//!
//! Collaborating services (area, SMS, user, resource, goods, order)
//! are consumed through the capability traits in this module and wired
//! together once at startup into a [`ServiceRegistry`]. Construction is
//! explicit: the caller builds each service, propagates any failure,
//! and hands the finished registry to whatever consumes it. There is
//! no hidden global state and no lazy initialization.

mod container;
mod traits;

#[cfg(test)]
mod tests;

pub use container::{ServiceRegistry, ServiceRegistryBuilder};
pub use traits::{
    AreaService, DatabaseProvider, GoodsService, OrderService, ResourceService, SmsService,
    UserService,
};
