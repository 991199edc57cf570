//! Binding tag kinds and their per-kind parameters.
//!
//! Extraction of sensor type and delay from a parsed tag is a single
//! pattern match over [`RawTag`]; the trigger variant carries no
//! parameters and is pinned to `TYPE_SIGNIFICANT_MOTION`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DelayHint, ParamType, SensorTypeCode, DELAY_UNSET, TYPE_SIGNIFICANT_MOTION};

/// The four recognized binding tag kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// `#[on_sensor_changed(..)]` - periodic event delivery
    SensorChanged,
    /// `#[on_accuracy_changed(..)]` - accuracy level changes
    AccuracyChanged,
    /// `#[on_sensor_not_available(..)]` - sensor missing on this device
    NotAvailable,
    /// `#[on_trigger]` - one-shot significant motion
    Trigger,
}

impl TagKind {
    /// Fixed processing order for a discovery pass
    pub const ALL: [TagKind; 4] = [
        TagKind::SensorChanged,
        TagKind::AccuracyChanged,
        TagKind::NotAvailable,
        TagKind::Trigger,
    ];

    /// The attribute path this kind is written as
    pub fn attribute(&self) -> &'static str {
        match self {
            TagKind::SensorChanged => "on_sensor_changed",
            TagKind::AccuracyChanged => "on_accuracy_changed",
            TagKind::NotAvailable => "on_sensor_not_available",
            TagKind::Trigger => "on_trigger",
        }
    }

    /// Reverse lookup from an attribute path
    pub fn from_attribute(name: &str) -> Option<Self> {
        TagKind::ALL.iter().copied().find(|k| k.attribute() == name)
    }

    /// Parameter shape the tagged method must declare
    pub fn expected_params(&self) -> &'static [ParamSpec] {
        match self {
            TagKind::SensorChanged => &[ParamSpec {
                type_name: "SensorEvent",
                by_ref: true,
            }],
            TagKind::AccuracyChanged => &[
                ParamSpec {
                    type_name: "SensorHandle",
                    by_ref: true,
                },
                ParamSpec {
                    type_name: "i32",
                    by_ref: false,
                },
            ],
            TagKind::NotAvailable => &[],
            TagKind::Trigger => &[ParamSpec {
                type_name: "TriggerEvent",
                by_ref: true,
            }],
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// One expected parameter of a tagged method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Last path segment of the expected type
    pub type_name: &'static str,

    /// Whether the parameter is taken by shared reference
    pub by_ref: bool,
}

impl ParamSpec {
    /// Render the expected form, e.g. `&SensorEvent` or `i32`
    pub fn display(&self) -> String {
        if self.by_ref {
            format!("&{}", self.type_name)
        } else {
            self.type_name.to_string()
        }
    }

    /// Check a declared parameter against this spec
    pub fn matches(&self, param: &ParamType) -> bool {
        param.by_ref == self.by_ref && param.type_name == self.type_name
    }
}

/// A binding tag exactly as parsed from source
///
/// Sensor type and delay may still hold the unset sentinels here;
/// [`crate::Declaration::new`] enforces the construction invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTag {
    SensorChanged {
        sensor_type: SensorTypeCode,
        delay: DelayHint,
    },
    AccuracyChanged {
        sensor_type: SensorTypeCode,
        delay: DelayHint,
    },
    NotAvailable {
        sensor_type: SensorTypeCode,
    },
    Trigger,
}

impl RawTag {
    /// The tag kind of this value
    pub fn kind(&self) -> TagKind {
        match self {
            RawTag::SensorChanged { .. } => TagKind::SensorChanged,
            RawTag::AccuracyChanged { .. } => TagKind::AccuracyChanged,
            RawTag::NotAvailable { .. } => TagKind::NotAvailable,
            RawTag::Trigger => TagKind::Trigger,
        }
    }

    /// Sensor type set on the tag; the trigger tag is fixed to
    /// `TYPE_SIGNIFICANT_MOTION`
    pub fn sensor_type(&self) -> SensorTypeCode {
        match self {
            RawTag::SensorChanged { sensor_type, .. }
            | RawTag::AccuracyChanged { sensor_type, .. }
            | RawTag::NotAvailable { sensor_type } => *sensor_type,
            RawTag::Trigger => TYPE_SIGNIFICANT_MOTION,
        }
    }

    /// Delay set on the tag, or `DELAY_UNSET` for kinds without one
    pub fn delay(&self) -> DelayHint {
        match self {
            RawTag::SensorChanged { delay, .. } | RawTag::AccuracyChanged { delay, .. } => *delay,
            RawTag::NotAvailable { .. } | RawTag::Trigger => DELAY_UNSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SENSOR_TYPE_UNSET;

    #[test]
    fn test_attribute_round_trip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_attribute(kind.attribute()), Some(kind));
        }
        assert_eq!(TagKind::from_attribute("on_something_else"), None);
    }

    #[test]
    fn test_trigger_tag_is_pinned_to_significant_motion() {
        let tag = RawTag::Trigger;
        assert_eq!(tag.sensor_type(), TYPE_SIGNIFICANT_MOTION);
        assert_eq!(tag.delay(), DELAY_UNSET);
    }

    #[test]
    fn test_raw_tag_extraction() {
        let tag = RawTag::SensorChanged {
            sensor_type: 2,
            delay: 3,
        };
        assert_eq!(tag.kind(), TagKind::SensorChanged);
        assert_eq!(tag.sensor_type(), 2);
        assert_eq!(tag.delay(), 3);

        let tag = RawTag::NotAvailable {
            sensor_type: SENSOR_TYPE_UNSET,
        };
        assert_eq!(tag.sensor_type(), SENSOR_TYPE_UNSET);
        assert_eq!(tag.delay(), DELAY_UNSET);
    }

    #[test]
    fn test_tag_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TagKind::SensorChanged).unwrap(),
            "\"sensor_changed\""
        );
        let round_trip: TagKind = serde_json::from_str("\"trigger\"").unwrap();
        assert_eq!(round_trip, TagKind::Trigger);
    }

    #[test]
    fn test_expected_params_shape() {
        assert_eq!(TagKind::SensorChanged.expected_params().len(), 1);
        assert_eq!(TagKind::AccuracyChanged.expected_params().len(), 2);
        assert!(TagKind::NotAvailable.expected_params().is_empty());
        assert_eq!(TagKind::Trigger.expected_params()[0].display(), "&TriggerEvent");
    }
}
