//! `generate` command implementation.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::cli::GenerateArgs;
use crate::commands::load_units;

/// Execute the `generate` command
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    info!(out_dir = %args.out_dir.display(), dry_run = args.dry_run, "Generating sensor binders");

    let units = load_units(&args.inputs)?;
    let discovered = discovery::discover(units);

    for rejection in &discovered.rejections {
        error!(
            owner = rejection.owner.as_deref().unwrap_or("<unknown>"),
            error = %rejection.error,
            "binding rejected"
        );
    }

    let generated = synthesis::generate(&discovered.map);

    for failure in &generated.failures {
        error!(owner = %failure.owner, error = %failure.error, "generation aborted");
    }

    if args.dry_run {
        info!(
            artifacts = generated.artifacts.len(),
            "Dry run, nothing written"
        );
    } else if generated.artifacts.is_empty() {
        warn!("No binder artifacts to write");
    } else {
        std::fs::create_dir_all(&args.out_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                args.out_dir.display()
            )
        })?;

        for artifact in &generated.artifacts {
            let path = artifact.write_to(&args.out_dir).with_context(|| {
                format!("Failed to write artifact for `{}`", artifact.owner)
            })?;
            info!(owner = %artifact.owner, path = %path.display(), "artifact written");
        }
    }

    let error_count = discovered.rejections.len() + generated.failures.len();
    if error_count > 0 {
        anyhow::bail!("Generation completed with {error_count} error(s)");
    }

    info!(
        types = generated.artifacts.len(),
        "Generation completed successfully"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GenerateArgs;
    use std::fs;

    const TAGGED_SOURCE: &str = r#"
pub struct Monitor;

impl Monitor {
    #[on_sensor_changed(sensor_type = 1, delay = 3)]
    pub fn on_accel(&self, event: &SensorEvent) {}
}
"#;

    #[test]
    fn test_generate_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("monitor.rs");
        fs::write(&src, TAGGED_SOURCE).unwrap();
        let out_dir = dir.path().join("out");

        let args = GenerateArgs {
            inputs: vec![src],
            out_dir: out_dir.clone(),
            dry_run: false,
        };
        run_generate(&args).unwrap();

        let generated = fs::read_to_string(out_dir.join("monitor_sensor_binder.rs")).unwrap();
        assert!(generated.contains("MonitorSensorBinder"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("monitor.rs");
        fs::write(&src, TAGGED_SOURCE).unwrap();
        let out_dir = dir.path().join("out");

        let args = GenerateArgs {
            inputs: vec![src],
            out_dir: out_dir.clone(),
            dry_run: true,
        };
        run_generate(&args).unwrap();

        assert!(!out_dir.exists());
    }

    #[test]
    fn test_invalid_binding_fails_command() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("bad.rs");
        fs::write(
            &src,
            r#"
pub struct Bad;
impl Bad {
    #[on_sensor_changed]
    pub fn on_changed(&self, event: &SensorEvent) {}
}
"#,
        )
        .unwrap();

        let args = GenerateArgs {
            inputs: vec![src],
            out_dir: dir.path().join("out"),
            dry_run: false,
        };
        let result = run_generate(&args);
        assert!(result.is_err());
    }
}
