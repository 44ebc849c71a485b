//! Global output mode for CLI commands.

use std::sync::atomic::{AtomicBool, Ordering};

static JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json(on: bool) {
    JSON.store(on, Ordering::Relaxed);
}

pub fn set_quiet(on: bool) {
    QUIET.store(on, Ordering::Relaxed);
}

/// Machine-readable output requested (`--json`).
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Non-essential output suppressed (`--quiet`, implied by `--json`).
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed) || is_json()
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("  Error: failed to encode output: {e}"),
    }
}
