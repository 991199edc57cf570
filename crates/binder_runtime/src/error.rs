//! Runtime error definitions.

use thiserror::Error;

/// Errors raised by the runtime binder registry
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Unbind called without a matching bind for the target instance
    #[error("no active binding for target of type {type_name}; call bind before unbind")]
    NotBound { type_name: &'static str },

    /// A registered factory received a target of an unexpected type
    #[error("binder registered for type {type_name} received a target of a different type")]
    TypeMismatch { type_name: &'static str },
}

impl RuntimeError {
    /// Create not-bound error for `T`
    pub fn not_bound<T: ?Sized>() -> Self {
        Self::NotBound {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create type-mismatch error for `T`
    pub fn type_mismatch<T: ?Sized>() -> Self {
        Self::TypeMismatch {
            type_name: std::any::type_name::<T>(),
        }
    }
}
