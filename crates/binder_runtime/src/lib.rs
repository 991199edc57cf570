//! # Binder Runtime
//!
//! Runtime support for generated sensor binders.
//!
//! Responsibilities:
//! - Listener wrappers and handler callbacks the generated code is built from
//! - The `SensorService` boundary to the platform sensor subsystem
//! - The `BinderRegistry` that resolves, caches, and drives binders
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use binder_runtime::{BinderRegistry, SensorContext};
//!
//! let registry = BinderRegistry::new();
//! register_generated_binders(&registry); // emitted by sensor-bindgen
//!
//! let monitor = Arc::new(Monitor::new());
//! registry.bind(&monitor, &context)?;
//! // ... sensor events flow into the tagged methods ...
//! registry.unbind(&monitor)?;
//! ```

mod error;
mod event;
mod handler;
pub mod mock;
mod registry;
mod service;
mod wrapper;

pub use contracts::{DelayHint, SensorTypeCode, TYPE_SIGNIFICANT_MOTION};
pub use error::RuntimeError;
pub use event::{SensorEvent, SensorHandle, TriggerEvent};
pub use handler::{SensorEventHandler, TriggerHandler};
pub use registry::{BinderRegistry, NoOpBinder, SensorBinder};
pub use service::{SensorContext, SensorService};
pub use wrapper::ListenerWrapper;
