//! `check` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::TagKind;

use crate::cli::CheckArgs;
use crate::commands::load_units;

/// Check result for JSON output
#[derive(Serialize)]
struct CheckResult {
    valid: bool,
    inputs: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<CheckError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<CheckSummary>,
}

#[derive(Serialize)]
struct CheckError {
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    message: String,
}

#[derive(Serialize)]
struct CheckSummary {
    type_count: usize,
    binding_count: usize,
    artifact_count: usize,
}

/// Execute the `check` command
pub fn run_check(args: &CheckArgs) -> Result<()> {
    info!(inputs = args.inputs.len(), "Checking binding sources");

    let result = check_sources(args)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&result).context("Failed to serialize check result")?;
        println!("{}", json);
    } else {
        print_check_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Binding check failed")
    }
}

fn check_sources(args: &CheckArgs) -> Result<CheckResult> {
    let inputs: Vec<String> = args
        .inputs
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let units = load_units(&args.inputs)?;
    let discovered = discovery::discover(units);
    let generated = synthesis::generate(&discovered.map);

    let mut errors: Vec<CheckError> = discovered
        .rejections
        .iter()
        .map(|rejection| CheckError {
            owner: rejection.owner.clone(),
            message: rejection.error.to_string(),
        })
        .collect();
    errors.extend(generated.failures.iter().map(|failure| CheckError {
        owner: Some(failure.owner.clone()),
        message: failure.error.to_string(),
    }));

    let binding_count: usize = discovered
        .map
        .iter()
        .map(|bindings| {
            bindings
                .iter()
                .map(|(_, slot)| {
                    TagKind::ALL
                        .iter()
                        .filter(|kind| slot.get(**kind).is_some())
                        .count()
                })
                .sum::<usize>()
        })
        .sum();

    let warnings = collect_warnings(&generated);

    Ok(CheckResult {
        valid: errors.is_empty(),
        inputs,
        errors,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
        summary: Some(CheckSummary {
            type_count: discovered.map.len(),
            binding_count,
            artifact_count: generated.artifacts.len(),
        }),
    })
}

/// Collect non-fatal issues
fn collect_warnings(generated: &synthesis::GenerationOutcome) -> Vec<String> {
    let mut warnings = Vec::new();

    if generated.artifacts.is_empty() && generated.failures.is_empty() {
        warnings.push("No binding tags found in the given sources".to_string());
    }

    // Two owning types with the same simple name collide on the artifact
    // file name when written to one output directory.
    for (i, artifact) in generated.artifacts.iter().enumerate() {
        if generated.artifacts[..i]
            .iter()
            .any(|other| other.file_name == artifact.file_name)
        {
            warnings.push(format!(
                "Artifact file name '{}' is produced by more than one owning type",
                artifact.file_name
            ));
        }
    }

    warnings
}

fn print_check_result(result: &CheckResult) {
    if result.valid {
        println!("✓ Bindings are valid: {}", result.inputs.join(", "));

        if let Some(ref summary) = result.summary {
            println!("\n  Owning types: {}", summary.type_count);
            println!("  Bindings: {}", summary.binding_count);
            println!("  Artifacts: {}", summary.artifact_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Bindings are invalid: {}", result.inputs.join(", "));
        println!();
        for error in &result.errors {
            match &error.owner {
                Some(owner) => println!("  Error [{}]: {}", owner, error.message),
                None => println!("  Error: {}", error.message),
            }
        }
    }
}
