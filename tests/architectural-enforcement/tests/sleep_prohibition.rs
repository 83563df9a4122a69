//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep. Time reaches the engines
//! through scheduled timers and refresh frames, and hosts wait on channels.
//! **Exception**: `TokioScheduler`, whose per-timer task is the one place a
//! delay is turned into a wake-up.

use architectural_enforcement::{assert_clean, scan};

fn is_sleep(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains("sleep_until(")
}

#[test]
fn test_no_sleep_in_core() {
    let violations = scan("disclosure/core/src", &["timing/scheduler.rs"], is_sleep);
    assert_clean("Sleep calls found in disclosure-core", &violations);
}

#[test]
fn test_no_sleep_in_tui() {
    let violations = scan("tui/src", &[], is_sleep);
    assert_clean("Sleep calls found in finfund-tui", &violations);
}
