//! # Synthesis
//!
//! Code synthesis engine: turns a validated discovery map into one
//! generated binder artifact per owning type.
//!
//! Responsibilities:
//! - Cross-tag validation that needs the full per-type group
//!   (significant-motion exclusivity, delay resolution, parameter shapes)
//! - Emitting the binder struct, its `SensorBinder` impl, and the
//!   `register` function that populates the runtime registration table
//!
//! A validation failure aborts the affected owning type's artifact only;
//! other owning types in the same pass still generate.

mod emitter;

use std::path::{Path, PathBuf};

use contracts::{BindingError, DiscoveryMap, TypeBindings};
use tracing::{info, instrument, warn};

/// One generated binder source artifact
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    /// Qualified owning type path
    pub owner: String,

    /// Generated struct name, e.g. `MonitorSensorBinder`
    pub struct_name: String,

    /// Artifact file name, e.g. `monitor_sensor_binder.rs`
    pub file_name: String,

    /// Complete formatted source text
    pub source: String,
}

impl GeneratedArtifact {
    /// Write the artifact into a directory, returning the full path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, BindingError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.source)?;
        Ok(path)
    }
}

/// One owning type whose artifact was aborted
#[derive(Debug)]
pub struct GenerationFailure {
    /// Qualified owning type path
    pub owner: String,

    /// The validation error, with the offending declaration attached
    pub error: BindingError,
}

/// Result of one generation pass
#[derive(Debug)]
pub struct GenerationOutcome {
    /// Artifacts for owning types that passed all validation
    pub artifacts: Vec<GeneratedArtifact>,

    /// Per-type failures; no partial artifacts are emitted for these
    pub failures: Vec<GenerationFailure>,
}

impl GenerationOutcome {
    /// Whether every owning type generated successfully
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate binder artifacts for every owning type in the map
#[instrument(name = "generation_pass", skip(map), fields(type_count = map.len()))]
pub fn generate(map: &DiscoveryMap) -> GenerationOutcome {
    let mut artifacts = Vec::new();
    let mut failures = Vec::new();

    for bindings in map.iter() {
        match generate_one(bindings) {
            Ok(artifact) => {
                info!(
                    owner = %artifact.owner,
                    file = %artifact.file_name,
                    "generated binder artifact"
                );
                artifacts.push(artifact);
            }
            Err(error) => {
                warn!(owner = %bindings.owner(), error = %error, "generation aborted for owning type");
                failures.push(GenerationFailure {
                    owner: bindings.owner().to_string(),
                    error,
                });
            }
        }
    }

    GenerationOutcome {
        artifacts,
        failures,
    }
}

fn generate_one(bindings: &TypeBindings) -> Result<GeneratedArtifact, BindingError> {
    let plan = emitter::plan(bindings)?;
    emitter::emit(&plan)
}
