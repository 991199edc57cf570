//! Discovery driver - one full pass over parsed source units
//!
//! For each of the four tag kinds, in a fixed order, every declaration
//! carrying that kind is validated, turned into a `Declaration`, and
//! grouped under its owning type. An error attributable to an owning type
//! drops that type from the resulting map; other types are unaffected.

use contracts::{BindingError, Declaration, DiscoveryMap, TagKind};
use tracing::{debug, instrument, warn};

use crate::parser::{SourceUnit, TaggedItem, TaggedMethod};
use crate::validator::check_method_validity;

/// One rejected binding, with the owning type when it could be determined
#[derive(Debug)]
pub struct Rejection {
    /// Owning type the error is attributable to, if any
    pub owner: Option<String>,

    /// The definitive rejection; bindings are never retried
    pub error: BindingError,
}

/// Result of one discovery pass
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// Grouped bindings for owning types that survived validation
    pub map: DiscoveryMap,

    /// Everything that was rejected during the pass
    pub rejections: Vec<Rejection>,
}

impl DiscoveryOutcome {
    /// Whether the pass completed without rejections
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Run one discovery pass over the given source units
#[instrument(name = "discovery_pass", skip(units), fields(unit_count = units.len()))]
pub fn discover(units: Vec<SourceUnit>) -> DiscoveryOutcome {
    let mut map = DiscoveryMap::new();
    let mut rejections = Vec::new();
    let mut poisoned: Vec<String> = Vec::new();
    let mut methods: Vec<TaggedMethod> = Vec::new();

    // Structural rejections were classified at parse time.
    for unit in units {
        for item in unit.items {
            match item {
                TaggedItem::Method(method) => methods.push(method),
                TaggedItem::Structural { owner, error } => {
                    warn!(unit = %unit.name, error = %error, "rejected tagged declaration");
                    if let Some(owner) = &owner {
                        poison(&mut poisoned, owner);
                    }
                    rejections.push(Rejection { owner, error });
                }
            }
        }
    }

    // One sub-pass per tag kind, in a fixed order.
    for kind in TagKind::ALL {
        for method in &methods {
            for tag in method.tags.iter().filter(|tag| tag.kind() == kind) {
                if let Err(error) = process_method(method, *tag, &mut map) {
                    warn!(
                        owner = %method.owner,
                        method = %method.name,
                        error = %error,
                        "rejected binding"
                    );
                    poison(&mut poisoned, &method.owner);
                    rejections.push(Rejection {
                        owner: Some(method.owner.clone()),
                        error,
                    });
                }
            }
        }
    }

    // A poisoned owning type loses its whole entry; no partial artifacts.
    for owner in &poisoned {
        if map.remove(owner).is_some() {
            debug!(owner = %owner, "dropped owning type after rejection");
        }
    }

    debug!(
        types = map.len(),
        rejections = rejections.len(),
        "discovery pass finished"
    );

    DiscoveryOutcome { map, rejections }
}

fn process_method(
    method: &TaggedMethod,
    tag: contracts::RawTag,
    map: &mut DiscoveryMap,
) -> Result<(), BindingError> {
    let decl = Declaration::new(
        method.owner.clone(),
        method.name.clone(),
        tag,
        method.params.clone(),
    )?;

    check_method_validity(method)?;

    map.entry_mut(&method.owner).add(decl)
}

fn poison(poisoned: &mut Vec<String>, owner: &str) {
    if !poisoned.iter().any(|p| p == owner) {
        poisoned.push(owner.to_string());
    }
}
