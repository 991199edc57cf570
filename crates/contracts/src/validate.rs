//! Binding validation rules
//!
//! Validation rules:
//! - parameter arity and ordered types match the tag kind's contract
//! - TYPE_SIGNIFICANT_MOTION carries only the trigger tag, and vice versa
//! - periodic sensor types resolve a usable delay

use crate::{
    BindingError, Declaration, DelayHint, SensorTypeCode, SlotSet, TagKind, DELAY_UNSET,
    TYPE_SIGNIFICANT_MOTION,
};

/// Check a declaration's parameter list against its tag kind's contract
///
/// Arity mismatch and type mismatch are reported separately, both naming
/// the owning type and method.
pub fn check_parameter_shape(decl: &Declaration) -> Result<(), BindingError> {
    let expected = decl.kind().expected_params();

    if decl.params().len() != expected.len() {
        return Err(BindingError::ParameterCount {
            tag: decl.kind(),
            expected: expected.len(),
            owner: decl.owner().to_string(),
            method: decl.method().to_string(),
        });
    }

    for (spec, param) in expected.iter().zip(decl.params()) {
        if !spec.matches(param) {
            let rendered = expected
                .iter()
                .map(|spec| spec.display())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(BindingError::ParameterType {
                tag: decl.kind(),
                expected: rendered,
                owner: decl.owner().to_string(),
                method: decl.method().to_string(),
            });
        }
    }

    Ok(())
}

/// Enforce significant-motion exclusivity for one sensor type slot
///
/// The reverse direction is structurally impossible today (the trigger tag
/// is pinned to TYPE_SIGNIFICANT_MOTION at extraction) and guards against
/// future tag kinds breaking the fixed mapping.
pub fn check_exclusivity(
    owner: &str,
    sensor_type: SensorTypeCode,
    slot: &SlotSet,
) -> Result<(), BindingError> {
    let has_periodic_tags = slot.get(TagKind::SensorChanged).is_some()
        || slot.get(TagKind::AccuracyChanged).is_some();

    if sensor_type == TYPE_SIGNIFICANT_MOTION && has_periodic_tags {
        return Err(BindingError::NotTriggerTag {
            owner: owner.to_string(),
        });
    }

    if sensor_type != TYPE_SIGNIFICANT_MOTION && slot.get(TagKind::Trigger).is_some() {
        return Err(BindingError::TriggerOnWrongSensor {
            owner: owner.to_string(),
            sensor_type,
        });
    }

    Ok(())
}

/// Resolve the registration delay for a periodic listener
///
/// The change tag's delay wins, then the accuracy tag's. Both tags can set
/// one but only one value is used when registering.
pub fn resolve_delay(
    owner: &str,
    sensor_type: SensorTypeCode,
    changed: Option<&Declaration>,
    accuracy: Option<&Declaration>,
) -> Result<DelayHint, BindingError> {
    if let Some(decl) = changed {
        if decl.delay() != DELAY_UNSET {
            return Ok(decl.delay());
        }
    }

    if let Some(decl) = accuracy {
        if decl.delay() != DELAY_UNSET {
            return Ok(decl.delay());
        }
    }

    Err(BindingError::UnresolvableDelay {
        owner: owner.to_string(),
        sensor_type,
    })
}
