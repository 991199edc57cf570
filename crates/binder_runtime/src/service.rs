//! SensorService trait - platform sensor subsystem boundary
//!
//! Defines a unified interface for the host platform's sensor subsystem,
//! decoupling generated binders from the concrete implementation. Supports
//! unified handling of real platform services and the mock service.

use std::sync::Arc;

use contracts::{DelayHint, SensorTypeCode};

use crate::{SensorEventHandler, SensorHandle, TriggerHandler};

/// Platform sensor subsystem trait
///
/// All calls are synchronous; registration and unregistration take effect
/// before the call returns. Unregistering a handler that is not registered
/// must be a no-op. A trigger listener fires once and is deregistered by
/// the platform itself.
pub trait SensorService: Send + Sync {
    /// Look up the default sensor for a type code, absent if unsupported
    fn default_sensor(&self, sensor_type: SensorTypeCode) -> Option<SensorHandle>;

    /// Register a periodic listener with the given sampling delay
    fn register_listener(
        &self,
        handler: Arc<SensorEventHandler>,
        sensor: &SensorHandle,
        delay: DelayHint,
    );

    /// Unregister a periodic listener; no-op if not registered
    fn unregister_listener(&self, handler: Arc<SensorEventHandler>);

    /// Request a one-shot trigger notification
    fn request_trigger_sensor(&self, handler: Arc<TriggerHandler>, sensor: &SensorHandle);

    /// Cancel a pending trigger request; no-op if none pending
    fn cancel_trigger_sensor(&self, handler: Arc<TriggerHandler>, sensor: &SensorHandle);
}

/// Ambient context handle passed to generated binder constructors
///
/// Carries the sensor service when the platform provides one. A binder
/// constructed from a headless context registers nothing.
#[derive(Clone)]
pub struct SensorContext {
    service: Option<Arc<dyn SensorService>>,
}

impl SensorContext {
    /// Context backed by a platform sensor service
    pub fn new(service: Arc<dyn SensorService>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Context without a sensor service (e.g. headless test environments)
    pub fn headless() -> Self {
        Self { service: None }
    }

    /// The sensor service handle, if one could be obtained
    pub fn sensor_service(&self) -> Option<Arc<dyn SensorService>> {
        self.service.clone()
    }
}
