//! Immutable registry of constructed services

use std::sync::Arc;

use tracing::info;

use crate::errors::RegistryError;

use super::traits::{
    AreaService, GoodsService, OrderService, ResourceService, SmsService, UserService,
};

/// Container for the business services, built once at startup
///
/// Every capability is constructed before the registry exists, so
/// initialization order is explicit at the call site and a failed
/// construction surfaces there via `?` instead of being retried later.
/// The registry is then shared, typically behind an `Arc`, for the
/// process lifetime. Accessors hand out cheap `Arc` clones.
pub struct ServiceRegistry {
    area: Arc<dyn AreaService>,
    sms: Arc<dyn SmsService>,
    user: Arc<dyn UserService>,
    resource: Arc<dyn ResourceService>,
    goods: Arc<dyn GoodsService>,
    order: Arc<dyn OrderService>,
}

impl ServiceRegistry {
    /// Starts assembling a registry
    pub fn builder() -> ServiceRegistryBuilder {
        ServiceRegistryBuilder::default()
    }

    pub fn area(&self) -> Arc<dyn AreaService> {
        Arc::clone(&self.area)
    }

    pub fn sms(&self) -> Arc<dyn SmsService> {
        Arc::clone(&self.sms)
    }

    pub fn user(&self) -> Arc<dyn UserService> {
        Arc::clone(&self.user)
    }

    pub fn resource(&self) -> Arc<dyn ResourceService> {
        Arc::clone(&self.resource)
    }

    pub fn goods(&self) -> Arc<dyn GoodsService> {
        Arc::clone(&self.goods)
    }

    pub fn order(&self) -> Arc<dyn OrderService> {
        Arc::clone(&self.order)
    }
}

/// Builder collecting the constructed services
///
/// `build` fails with [`RegistryError::MissingService`] naming the
/// first capability that was never supplied.
#[derive(Default)]
pub struct ServiceRegistryBuilder {
    area: Option<Arc<dyn AreaService>>,
    sms: Option<Arc<dyn SmsService>>,
    user: Option<Arc<dyn UserService>>,
    resource: Option<Arc<dyn ResourceService>>,
    goods: Option<Arc<dyn GoodsService>>,
    order: Option<Arc<dyn OrderService>>,
}

impl ServiceRegistryBuilder {
    pub fn area(mut self, svc: Arc<dyn AreaService>) -> Self {
        self.area = Some(svc);
        self
    }

    pub fn sms(mut self, svc: Arc<dyn SmsService>) -> Self {
        self.sms = Some(svc);
        self
    }

    pub fn user(mut self, svc: Arc<dyn UserService>) -> Self {
        self.user = Some(svc);
        self
    }

    pub fn resource(mut self, svc: Arc<dyn ResourceService>) -> Self {
        self.resource = Some(svc);
        self
    }

    pub fn goods(mut self, svc: Arc<dyn GoodsService>) -> Self {
        self.goods = Some(svc);
        self
    }

    pub fn order(mut self, svc: Arc<dyn OrderService>) -> Self {
        self.order = Some(svc);
        self
    }

    /// Finalizes the registry
    pub fn build(self) -> Result<ServiceRegistry, RegistryError> {
        let registry = ServiceRegistry {
            area: self.area.ok_or(RegistryError::MissingService { name: "area" })?,
            sms: self.sms.ok_or(RegistryError::MissingService { name: "sms" })?,
            user: self.user.ok_or(RegistryError::MissingService { name: "user" })?,
            resource: self
                .resource
                .ok_or(RegistryError::MissingService { name: "resource" })?,
            goods: self
                .goods
                .ok_or(RegistryError::MissingService { name: "goods" })?,
            order: self
                .order
                .ok_or(RegistryError::MissingService { name: "order" })?,
        };

        info!("service registry constructed");
        Ok(registry)
    }
}
