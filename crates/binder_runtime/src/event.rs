//! Platform event records and sensor handles.

use contracts::SensorTypeCode;

/// One periodic sensor event delivered to a registered listener
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    /// Delivery timestamp (nanoseconds, platform clock)
    pub timestamp: i64,

    /// Numeric value vector; layout depends on the sensor type
    pub values: Vec<f32>,
}

impl SensorEvent {
    /// Create an event record
    pub fn new(timestamp: i64, values: Vec<f32>) -> Self {
        Self { timestamp, values }
    }
}

/// The single event delivered to a one-shot trigger listener
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    /// Delivery timestamp (nanoseconds, platform clock)
    pub timestamp: i64,

    /// Numeric value vector
    pub values: Vec<f32>,
}

impl TriggerEvent {
    /// Create a trigger event record
    pub fn new(timestamp: i64, values: Vec<f32>) -> Self {
        Self { timestamp, values }
    }
}

/// Handle to a concrete platform sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorHandle {
    /// Sensor type code this handle resolves
    pub sensor_type: SensorTypeCode,

    /// Human-readable sensor name
    pub name: String,
}

impl SensorHandle {
    /// Create a handle for a sensor type
    pub fn new(sensor_type: SensorTypeCode, name: impl Into<String>) -> Self {
        Self {
            sensor_type,
            name: name.into(),
        }
    }
}
