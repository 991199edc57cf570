//! Listener wrappers - re-registering an event listener with the correct
//! values.
//!
//! A wrapper pairs a sensor type with its handler and knows how to
//! register and unregister against the sensor service. The trigger variant
//! uses the request/cancel pair instead and is pinned to
//! `TYPE_SIGNIFICANT_MOTION`.

use std::sync::Arc;

use contracts::{DelayHint, SensorTypeCode, DELAY_UNSET, TYPE_SIGNIFICANT_MOTION};

use crate::{SensorEventHandler, SensorHandle, SensorService, TriggerHandler};

/// One listener wrapper owned by a generated binder
#[derive(Debug)]
pub enum ListenerWrapper {
    /// Periodic listener, registered with a sampling delay
    Periodic {
        sensor_type: SensorTypeCode,
        delay: DelayHint,
        handler: Arc<SensorEventHandler>,
    },

    /// One-shot trigger listener; the platform deregisters it after firing
    Trigger { handler: Arc<TriggerHandler> },
}

impl ListenerWrapper {
    /// Build a periodic wrapper
    pub fn periodic(
        sensor_type: SensorTypeCode,
        delay: DelayHint,
        handler: SensorEventHandler,
    ) -> Self {
        Self::Periodic {
            sensor_type,
            delay,
            handler: Arc::new(handler),
        }
    }

    /// Build a trigger wrapper
    pub fn trigger(handler: TriggerHandler) -> Self {
        Self::Trigger {
            handler: Arc::new(handler),
        }
    }

    /// Sensor type this wrapper targets
    pub fn sensor_type(&self) -> SensorTypeCode {
        match self {
            Self::Periodic { sensor_type, .. } => *sensor_type,
            Self::Trigger { .. } => TYPE_SIGNIFICANT_MOTION,
        }
    }

    /// Registration delay; `DELAY_UNSET` for trigger wrappers
    pub fn delay(&self) -> DelayHint {
        match self {
            Self::Periodic { delay, .. } => *delay,
            Self::Trigger { .. } => DELAY_UNSET,
        }
    }

    /// Resolve the concrete sensor handle from the service
    pub fn sensor(&self, service: &dyn SensorService) -> Option<SensorHandle> {
        service.default_sensor(self.sensor_type())
    }

    /// Register against the service; skipped when the sensor is absent
    pub fn register(&self, service: &dyn SensorService) {
        let Some(sensor) = self.sensor(service) else {
            return;
        };
        match self {
            Self::Periodic { delay, handler, .. } => {
                service.register_listener(Arc::clone(handler), &sensor, *delay);
            }
            Self::Trigger { handler } => {
                service.request_trigger_sensor(Arc::clone(handler), &sensor);
            }
        }
    }

    /// Unregister from the service; a platform-contract no-op when the
    /// wrapper was never registered
    pub fn unregister(&self, service: &dyn SensorService) {
        match self {
            Self::Periodic { handler, .. } => {
                service.unregister_listener(Arc::clone(handler));
            }
            Self::Trigger { handler } => {
                if let Some(sensor) = self.sensor(service) {
                    service.cancel_trigger_sensor(Arc::clone(handler), &sensor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockSensorService, ServiceCall};

    fn noop_periodic(sensor_type: SensorTypeCode, delay: DelayHint) -> ListenerWrapper {
        ListenerWrapper::periodic(
            sensor_type,
            delay,
            SensorEventHandler::new(|_event| {}, |_sensor, _accuracy| {}),
        )
    }

    #[test]
    fn test_periodic_register_unregister() {
        let service = MockSensorService::with_sensors(vec![2]);
        let wrapper = noop_periodic(2, 3);

        wrapper.register(&service);
        wrapper.unregister(&service);

        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::Register {
                    sensor_type: 2,
                    delay: 3
                },
                ServiceCall::Unregister { sensor_type: 2 },
            ]
        );
    }

    #[test]
    fn test_register_skips_absent_sensor() {
        let service = MockSensorService::new();
        let wrapper = noop_periodic(2, 3);

        wrapper.register(&service);
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_trigger_uses_request_cancel_pair() {
        let service = MockSensorService::with_sensors(vec![TYPE_SIGNIFICANT_MOTION]);
        let wrapper = ListenerWrapper::trigger(TriggerHandler::new(|_event| {}));

        assert_eq!(wrapper.sensor_type(), TYPE_SIGNIFICANT_MOTION);
        assert_eq!(wrapper.delay(), DELAY_UNSET);

        wrapper.register(&service);
        wrapper.unregister(&service);

        assert_eq!(
            service.calls(),
            vec![
                ServiceCall::RequestTrigger {
                    sensor_type: TYPE_SIGNIFICANT_MOTION
                },
                ServiceCall::CancelTrigger {
                    sensor_type: TYPE_SIGNIFICANT_MOTION
                },
            ]
        );
    }
}
