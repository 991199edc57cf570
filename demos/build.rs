//! Runs the binding generator over the demo sources at build time and
//! drops the artifacts into OUT_DIR, where main.rs includes them.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=src/monitor.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let unit = discovery::parse_path(Path::new("src/monitor.rs")).expect("parse src/monitor.rs");
    let discovered = discovery::discover(vec![unit]);
    if !discovered.is_clean() {
        panic!("binding discovery failed: {:?}", discovered.rejections);
    }

    let generated = synthesis::generate(&discovered.map);
    if !generated.is_clean() {
        panic!("binder generation failed: {:?}", generated.failures);
    }

    for artifact in &generated.artifacts {
        artifact.write_to(&out_dir).expect("write artifact");
    }
}
