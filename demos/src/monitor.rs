//! Demo target type with tagged sensor-binding methods.
//!
//! `build.rs` runs the generator over this file; the generated
//! `AccelerometerMonitorSensorBinder` lands in OUT_DIR.

use binder_runtime::{SensorEvent, SensorHandle, TriggerEvent};
use binding_tags::{on_accuracy_changed, on_sensor_changed, on_sensor_not_available, on_trigger};

/// Watches the accelerometer and the significant-motion trigger.
pub struct AccelerometerMonitor;

impl AccelerometerMonitor {
    pub fn new() -> Self {
        Self
    }

    #[on_sensor_changed(sensor_type = TYPE_ACCELEROMETER, delay = SENSOR_DELAY_NORMAL)]
    pub fn on_accel_changed(&self, event: &SensorEvent) {
        tracing::info!(
            timestamp = event.timestamp,
            values = ?event.values,
            "accelerometer event"
        );
    }

    #[on_accuracy_changed(sensor_type = TYPE_ACCELEROMETER)]
    pub fn on_accel_accuracy_changed(&self, sensor: &SensorHandle, accuracy: i32) {
        tracing::info!(sensor = %sensor.name, accuracy, "accelerometer accuracy changed");
    }

    #[on_sensor_not_available(sensor_type = TYPE_ACCELEROMETER)]
    pub fn on_accel_not_available(&self) {
        tracing::warn!("accelerometer not available on this device");
    }

    #[on_trigger]
    pub fn on_significant_motion(&self, event: &TriggerEvent) {
        tracing::info!(timestamp = event.timestamp, "significant motion detected");
    }
}

impl Default for AccelerometerMonitor {
    fn default() -> Self {
        Self::new()
    }
}
