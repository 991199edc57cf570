//! Mock Binding Demo
//!
//! Demonstrates the full loop: the binder generated at build time for
//! `AccelerometerMonitor` is registered, bound against a mock sensor
//! service, driven with events, and unbound. Runs without any real
//! platform sensor subsystem.
//!
//! Run with: cargo run --bin mock_binding_demo

mod monitor;

use std::sync::Arc;

use binder_runtime::mock::MockSensorService;
use binder_runtime::{BinderRegistry, SensorContext, SensorEvent, SensorHandle, TriggerEvent};
use contracts::{TYPE_ACCELEROMETER, TYPE_SIGNIFICANT_MOTION};

// Re-exported so the generated sibling module resolves `super::AccelerometerMonitor`.
pub use monitor::AccelerometerMonitor;

mod accelerometer_monitor_sensor_binder {
    include!(concat!(
        env!("OUT_DIR"),
        "/accelerometer_monitor_sensor_binder.rs"
    ));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Mock Binding Demo");

    // ==== Stage 1: Registry with the generated binder ====
    let registry = BinderRegistry::new();
    accelerometer_monitor_sensor_binder::register(&registry);

    // ==== Stage 2: Mock sensor service with both sensors present ====
    let service = Arc::new(MockSensorService::with_sensors(vec![
        TYPE_ACCELEROMETER,
        TYPE_SIGNIFICANT_MOTION,
    ]));
    let context = SensorContext::new(service.clone());

    // ==== Stage 3: Bind and drive events ====
    let monitor = Arc::new(AccelerometerMonitor::new());
    registry.bind(&monitor, &context)?;

    service.deliver_sensor_event(TYPE_ACCELEROMETER, &SensorEvent::new(1_000, vec![0.1, 9.8, 0.3]));
    service.deliver_sensor_event(TYPE_ACCELEROMETER, &SensorEvent::new(2_000, vec![0.2, 9.7, 0.2]));
    service.deliver_accuracy_changed(&SensorHandle::new(TYPE_ACCELEROMETER, "accelerometer"), 3);

    // The trigger listener fires once and self-removes.
    service.fire_trigger(&TriggerEvent::new(3_000, vec![1.0]));
    service.fire_trigger(&TriggerEvent::new(4_000, vec![1.0]));

    registry.unbind(&monitor)?;
    tracing::info!(calls = ?service.calls(), "service call record after unbind");

    // ==== Stage 4: Same binder on a device without an accelerometer ====
    let bare_service = Arc::new(MockSensorService::with_sensors(vec![
        TYPE_SIGNIFICANT_MOTION,
    ]));
    let bare_context = SensorContext::new(bare_service.clone());

    let second = Arc::new(AccelerometerMonitor::new());
    registry.bind(&second, &bare_context)?;
    registry.unbind(&second)?;

    tracing::info!("Mock Binding Demo finished");
    Ok(())
}
