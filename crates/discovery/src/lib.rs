//! # Discovery
//!
//! Tagged-declaration discovery over Rust source files.
//!
//! Responsibilities:
//! - Parse source files and collect every binding-tagged declaration
//! - Check method validity (reachability, body presence)
//! - Group declarations per owning type into a `DiscoveryMap`
//!
//! # Example
//!
//! ```no_run
//! use discovery::{discover, parse_path};
//! use std::path::Path;
//!
//! let unit = parse_path(Path::new("src/monitor.rs")).unwrap();
//! let outcome = discover(vec![unit]);
//! println!("types: {}", outcome.map.len());
//! ```

mod driver;
mod parser;
pub mod validator;

pub use contracts::DiscoveryMap;
pub use driver::{discover, DiscoveryOutcome, Rejection};
pub use parser::{parse_source, MethodVisibility, SourceUnit, TaggedItem, TaggedMethod};

use std::path::Path;

use contracts::BindingError;

/// Parse one source file from disk
///
/// # Errors
/// - File read failure
/// - Source parse failure
/// - Malformed tag arguments surface later, attached to the owning type
pub fn parse_path(path: &Path) -> Result<SourceUnit, BindingError> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<source>");
    parse_source(name, &content)
}
