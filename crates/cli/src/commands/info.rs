//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{sensor_type_name, TagKind, DELAY_UNSET};

use crate::cli::InfoArgs;
use crate::commands::load_units;

/// One binding row for display
#[derive(Serialize)]
struct BindingRow {
    owner: String,
    sensor_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sensor_name: Option<String>,
    tag: TagKind,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay: Option<i32>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(inputs = args.inputs.len(), "Inspecting binding sources");

    let units = load_units(&args.inputs)?;
    let discovered = discovery::discover(units);
    let rows = binding_rows(&discovered.map);

    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize bindings")?;
        println!("{}", json);
    } else {
        print_rows(&rows, discovered.rejections.len());
    }

    Ok(())
}

fn binding_rows(map: &contracts::DiscoveryMap) -> Vec<BindingRow> {
    let mut rows = Vec::new();

    for bindings in map.iter() {
        for (sensor_type, slot) in bindings.iter() {
            for kind in TagKind::ALL {
                let Some(decl) = slot.get(kind) else {
                    continue;
                };
                rows.push(BindingRow {
                    owner: bindings.owner().to_string(),
                    sensor_type,
                    sensor_name: sensor_type_name(sensor_type).map(str::to_string),
                    tag: kind,
                    method: decl.method().to_string(),
                    delay: (decl.delay() != DELAY_UNSET).then(|| decl.delay()),
                });
            }
        }
    }

    rows
}

fn print_rows(rows: &[BindingRow], rejection_count: usize) {
    if rows.is_empty() {
        println!("No bindings discovered.");
    } else {
        println!("Discovered bindings:\n");
        for row in rows {
            let sensor = match &row.sensor_name {
                Some(name) => format!("{} ({})", row.sensor_type, name),
                None => row.sensor_type.to_string(),
            };
            let delay = match row.delay {
                Some(delay) => format!(", delay {delay}"),
                None => String::new(),
            };
            println!(
                "  {}::{} - #[{}] sensor {}{}",
                row.owner, row.method, row.tag, sensor, delay
            );
        }
    }

    if rejection_count > 0 {
        println!("\n{rejection_count} binding(s) were rejected; run `check` for details.");
    }
}
