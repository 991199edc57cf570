//! # Binding Tags
//!
//! The four sensor-binding method attributes.
//!
//! The attributes are inert at compile time: they validate nothing and
//! expand to the tagged item unchanged. All extraction and validation is
//! done by the `sensor-bindgen` scanner, which reads the source text
//! before macro expansion.

use proc_macro::TokenStream;

/// Binds a method to periodic sensor event delivery.
///
/// ```ignore
/// #[on_sensor_changed(sensor_type = TYPE_ACCELEROMETER, delay = SENSOR_DELAY_NORMAL)]
/// pub fn on_accel_changed(&self, event: &SensorEvent) { /* ... */ }
/// ```
///
/// The method takes exactly one `&SensorEvent` parameter. `delay` may be
/// omitted here when the accuracy tag for the same sensor type sets one.
#[proc_macro_attribute]
pub fn on_sensor_changed(_args: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Binds a method to sensor accuracy changes.
///
/// ```ignore
/// #[on_accuracy_changed(sensor_type = TYPE_MAGNETIC_FIELD, delay = 3)]
/// pub fn on_accuracy(&self, sensor: &SensorHandle, accuracy: i32) { /* ... */ }
/// ```
///
/// The method takes `(&SensorHandle, i32)`.
#[proc_macro_attribute]
pub fn on_accuracy_changed(_args: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Binds a zero-parameter fallback called when the sensor type is not
/// available on the device.
///
/// ```ignore
/// #[on_sensor_not_available(sensor_type = TYPE_HEART_RATE)]
/// pub fn on_heart_rate_missing(&self) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn on_sensor_not_available(_args: TokenStream, item: TokenStream) -> TokenStream {
    item
}

/// Binds a method to the one-shot significant-motion trigger.
///
/// Takes no arguments; the sensor type is implicitly
/// `TYPE_SIGNIFICANT_MOTION`. The method takes one `&TriggerEvent`
/// parameter and fires at most once per registration.
#[proc_macro_attribute]
pub fn on_trigger(_args: TokenStream, item: TokenStream) -> TokenStream {
    item
}
