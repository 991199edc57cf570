//! Layered error definitions
//!
//! Categorized by source: tag extraction / grouping / validation / structure

use thiserror::Error;

use crate::{SensorTypeCode, TagKind};

/// Unified compiler-path error type
#[derive(Debug, Error)]
pub enum BindingError {
    // ===== Tag Extraction Errors =====
    /// Tag lacks a resolvable sensor type
    #[error("no sensor type specified in #[{tag}] for method `{method}`: set a sensor type such as TYPE_ACCELEROMETER")]
    MissingSensorType { tag: TagKind, method: String },

    /// Tag arguments could not be parsed
    #[error("invalid #[{tag}] arguments on `{method}`: {message}")]
    TagSyntax {
        tag: TagKind,
        method: String,
        message: String,
    },

    // ===== Grouping Errors =====
    /// Two declarations claim the same (sensor type, tag kind) slot
    #[error("#[{tag}] is already bound for sensor type {sensor_type} on a different method in `{owner}` (`{method}`)")]
    DuplicateBinding {
        tag: TagKind,
        sensor_type: SensorTypeCode,
        owner: String,
        method: String,
    },

    // ===== Parameter Shape Errors =====
    /// Wrong parameter count for the tag kind
    #[error("#[{tag}] methods take exactly {expected} parameter(s) ({owner}::{method})")]
    ParameterCount {
        tag: TagKind,
        expected: usize,
        owner: String,
        method: String,
    },

    /// Wrong parameter types for the tag kind
    #[error("method parameters are not valid for #[{tag}]: expected ({expected}) ({owner}::{method})")]
    ParameterType {
        tag: TagKind,
        expected: String,
        owner: String,
        method: String,
    },

    // ===== Exclusivity Errors =====
    /// Change/accuracy tags target the significant-motion sensor type
    #[error("#[on_sensor_changed] and #[on_accuracy_changed] are not supported for TYPE_SIGNIFICANT_MOTION in `{owner}`; use #[on_trigger] instead")]
    NotTriggerTag { owner: String },

    /// Trigger tag targets a sensor type other than significant motion
    #[error("#[on_trigger] is only supported for TYPE_SIGNIFICANT_MOTION, found sensor type {sensor_type} in `{owner}`")]
    TriggerOnWrongSensor {
        owner: String,
        sensor_type: SensorTypeCode,
    },

    // ===== Delay Errors =====
    /// No usable delay for a periodic sensor type
    #[error("#[on_sensor_changed] or #[on_accuracy_changed] needs a delay value for sensor type {sensor_type} in `{owner}`")]
    UnresolvableDelay {
        owner: String,
        sensor_type: SensorTypeCode,
    },

    // ===== Reachability Errors =====
    /// Declaration not callable from the generated binder
    #[error("the method `{method}` can not be private or restricted; mark it pub or pub(crate) so the generated binder can call it")]
    RestrictedVisibility { method: String },

    /// Declaration has no body to call
    #[error("the method `{method}` has no body; tag the implementing method, not the trait declaration")]
    AbstractMethod { method: String },

    // ===== Structural Errors =====
    /// Tagged item is not a method-like executable member
    #[error("only methods taking &self can be tagged with #[{tag}] ({what})")]
    NotAMethod { tag: TagKind, what: String },

    /// Owning type of the tagged method cannot be determined
    #[error("can not find an owning type for `{method}`")]
    NoOwningType { method: String },

    /// Source file could not be parsed at all
    #[error("source parse error in '{unit}': {message}")]
    SourceParse { unit: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BindingError {
    /// Create duplicate-binding error
    pub fn duplicate_binding(
        tag: TagKind,
        sensor_type: SensorTypeCode,
        owner: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self::DuplicateBinding {
            tag,
            sensor_type,
            owner: owner.into(),
            method: method.into(),
        }
    }

    /// Create tag-syntax error
    pub fn tag_syntax(
        tag: TagKind,
        method: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TagSyntax {
            tag,
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create source-parse error
    pub fn source_parse(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceParse {
            unit: unit.into(),
            message: message.into(),
        }
    }
}
