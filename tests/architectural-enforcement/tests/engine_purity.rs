//! Integration Test: Engine Purity
//!
//! The typewriter and gauge engines are plain state machines. They may only
//! learn about time from the `TimerId`s and `FrameTick`s handed to them, so
//! they must not read clocks, spawn tasks or block threads.

use std::fs;

use architectural_enforcement::{assert_clean, scan, workspace_root};

const ENGINE_DIRS: &[&str] = &["disclosure/core/src/reveal", "disclosure/core/src/gauge"];

fn touches_runtime(code: &str) -> bool {
    ["Instant::now", "SystemTime", "tokio::", "std::thread", "thread::"]
        .iter()
        .any(|pattern| code.contains(pattern))
}

#[test]
fn test_engines_do_not_read_clocks_or_runtime() {
    let violations: Vec<_> = ENGINE_DIRS
        .iter()
        .flat_map(|dir| scan(dir, &[], touches_runtime))
        .collect();
    assert_clean("Engines reach for a clock or runtime directly", &violations);
}

#[test]
fn test_engines_do_not_depend_on_each_other() {
    let reveal = scan("disclosure/core/src/reveal", &[], |code| code.contains("gauge"));
    let gauge = scan("disclosure/core/src/gauge", &[], |code| code.contains("reveal"));
    assert_clean("reveal and gauge must stay independent", &[reveal, gauge].concat());
}

#[test]
fn test_core_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("disclosure/core/Cargo.toml"))
        .expect("core manifest is readable");
    for ui_crate in ["ratatui", "crossterm"] {
        assert!(
            !manifest.contains(ui_crate),
            "disclosure-core must not depend on {ui_crate}"
        );
    }
}
