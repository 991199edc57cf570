//! Handler callbacks invoked by the platform on event delivery.
//!
//! Generated binders construct these with closures that call back into the
//! tagged methods of the target instance. Handlers are held behind `Arc` so
//! register/unregister pairs can be matched by identity.

use std::fmt;

use crate::{SensorEvent, SensorHandle, TriggerEvent};

type ChangedFn = Box<dyn Fn(&SensorEvent) + Send + Sync>;
type AccuracyFn = Box<dyn Fn(&SensorHandle, i32) + Send + Sync>;
type TriggerFn = Box<dyn Fn(&TriggerEvent) + Send + Sync>;

/// Callback pair for a periodic sensor listener
pub struct SensorEventHandler {
    on_changed: ChangedFn,
    on_accuracy_changed: AccuracyFn,
}

impl SensorEventHandler {
    /// Build a handler from the two delivery callbacks
    ///
    /// A tag kind without a bound method passes a no-op closure.
    pub fn new(
        on_changed: impl Fn(&SensorEvent) + Send + Sync + 'static,
        on_accuracy_changed: impl Fn(&SensorHandle, i32) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_changed: Box::new(on_changed),
            on_accuracy_changed: Box::new(on_accuracy_changed),
        }
    }

    /// Deliver a sensor event
    pub fn sensor_changed(&self, event: &SensorEvent) {
        (self.on_changed)(event);
    }

    /// Deliver an accuracy change
    pub fn accuracy_changed(&self, sensor: &SensorHandle, accuracy: i32) {
        (self.on_accuracy_changed)(sensor, accuracy);
    }
}

impl fmt::Debug for SensorEventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SensorEventHandler")
    }
}

/// Callback for a one-shot trigger listener
pub struct TriggerHandler {
    on_trigger: TriggerFn,
}

impl TriggerHandler {
    /// Build a handler from the trigger callback
    pub fn new(on_trigger: impl Fn(&TriggerEvent) + Send + Sync + 'static) -> Self {
        Self {
            on_trigger: Box::new(on_trigger),
        }
    }

    /// Deliver the single trigger event
    pub fn triggered(&self, event: &TriggerEvent) {
        (self.on_trigger)(event);
    }
}

impl fmt::Debug for TriggerHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerHandler")
    }
}
