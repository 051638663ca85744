//! Final integration test for dircontrol.
//!
//! Exercises the full pipeline:
//! 1. Creates a realistic project directory
//! 2. Serializes it into a structure document
//! 3. Discovers, reads, parses and builds that document into an empty root
//! 4. Serializes the rebuilt root and compares both trees
//! 5. Rebuilds again and checks nothing changes
//!
//! Run with tracing output:
//!   RUST_LOG=debug cargo test --test final_integration -- --nocapture

mod common;

use common::{list_tree, named_root, populate};
use dircontrol::discover::locate_structure_file;
use dircontrol::report::{status_line, summary_line};
use dircontrol::textfile::read_text_file;
use dircontrol::tree::{generate_structure_file, serialize, SerializeConfig, STRUCTURE_FILE};
use dircontrol::{parse_nodes, Action, KnownDirs, TreeBuilder};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::EnvFilter;

// ───────────────────────────────────────────────────
// Helpers
// ───────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Create a realistic project fixture.
fn create_project_fixture(root: &Path) {
    info!("Creating project fixture at {}", root.display());
    populate(
        root,
        &[
            "src/",
            "src/components/",
            "src/components/Button.tsx",
            "src/components/Modal.tsx",
            "src/utils/",
            "src/utils/format.ts",
            "src/index.ts",
            "public/",
            "public/favicon.ico",
            "assets/",
            "docs/",
            "docs/guide.md",
            "package.json",
            "Makefile",
            "LICENSE",
        ],
    );
    fs::write(root.join(".gitignore"), "*.log\ncoverage/\n").unwrap();
    populate(root, &["debug.log", "coverage/lcov.info", "node_modules/x/index.js"]);
}

// ───────────────────────────────────────────────────
// Full round trip
// ───────────────────────────────────────────────────

#[test]
fn test_round_trip_reproduces_tree() {
    init_tracing();
    let span = span!(Level::INFO, "round_trip");
    let _guard = span.enter();

    let (_src_tmp, original) = named_root("shop");
    create_project_fixture(&original);

    // 1. Serialize the original.
    let start = Instant::now();
    let config = SerializeConfig::for_root(&original, STRUCTURE_FILE);
    let generated = generate_structure_file(&original, &config).unwrap();
    info!(
        "serialized {} entries in {:?}",
        generated.serialized.entries.len(),
        start.elapsed()
    );
    let document = fs::read_to_string(&generated.path).unwrap();
    debug!("document:\n{}", document);
    assert!(document.starts_with("# Generated Structure\n# Files: 9 | Dirs: 6\n\nshop/\n"));
    assert!(!document.contains("debug.log"));
    assert!(!document.contains("coverage"));
    assert!(!document.contains("node_modules"));

    // 2. Move the document into an empty root with the same name.
    let (_dst_tmp, rebuilt) = named_root("shop");
    fs::copy(&generated.path, rebuilt.join(STRUCTURE_FILE)).unwrap();

    let found = locate_structure_file(&rebuilt).unwrap();
    assert_eq!(found, rebuilt.join(STRUCTURE_FILE));
    let lines = read_text_file(&found).unwrap();
    let nodes = parse_nodes(&lines, &KnownDirs::default());
    info!("parsed {} nodes", nodes.len());
    assert_eq!(nodes.len(), 16);

    // 3. Build.
    let builder = TreeBuilder::new(&rebuilt);
    let report = builder.build(&nodes);
    for line in report.outcomes.iter().filter_map(|o| status_line(o, &rebuilt)) {
        debug!("{}", line);
    }
    info!("{}", summary_line(&report.stats));
    assert_eq!(report.outcomes[0].action, Action::RootWrap);
    assert_eq!(report.stats.dirs_created, 6);
    assert_eq!(report.stats.files_scaffolded, 9);
    assert_eq!(report.stats.failures, 0);

    // 4. Compare.
    let rebuilt_tree = serialize(&rebuilt, &SerializeConfig::default());
    assert_eq!(rebuilt_tree.text, generated.serialized.text);
    assert_eq!(rebuilt_tree.stats, generated.serialized.stats);

    // 5. Idempotence.
    let before = list_tree(&rebuilt);
    let again = builder.build(&nodes);
    assert!(!again.stats.changed_anything());
    assert_eq!(again.stats.files_skipped, 9);
    assert_eq!(list_tree(&rebuilt), before);
}

#[test]
fn test_round_trip_adopts_loose_files() {
    init_tracing();

    let (_src_tmp, original) = named_root("kit");
    populate(&original, &["lib/", "lib/core.py", "bin/", "bin/run.sh"]);
    let generated = generate_structure_file(&original, &SerializeConfig::default()).unwrap();

    let (_dst_tmp, target) = named_root("kit");
    fs::write(target.join("core.py"), "def main(): pass\n").unwrap();
    fs::write(target.join("run.sh"), "#!/bin/sh\n").unwrap();

    let lines = read_text_file(&generated.path).unwrap();
    let nodes = parse_nodes(&lines, &KnownDirs::default());
    let report = TreeBuilder::new(&target).build(&nodes);

    assert_eq!(report.stats.files_moved, 2);
    assert_eq!(report.stats.files_scaffolded, 0);
    assert_eq!(
        fs::read_to_string(target.join("lib/core.py")).unwrap(),
        "def main(): pass\n"
    );
    assert_eq!(list_tree(&target), vec!["bin/", "bin/run.sh", "lib/", "lib/core.py"]);
}
