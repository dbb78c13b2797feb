#![forbid(unsafe_code)]

//! Test harness for Formwork.
//!
//! Provides the collaborators a real host would supply, in memory:
//!
//! - [`MemoryUi`]: a readable, writable stand-in for the rendered view.
//! - [`RecordingExecutor`]: a template executor that records its calls.
//! - [`MapLoader`]: named templates from a map.
//!
//! Integration tests live in `tests/` and drive whole forms through them.

pub mod exec;
pub mod ui;

use std::sync::Once;

pub use exec::{Execution, MapLoader, RecordingExecutor};
pub use ui::MemoryUi;

/// Install a `fmt` subscriber writing through the test writer, once per
/// process. Verbosity follows `FORMWORK_LOG` (`error`..`trace`), default
/// `debug`.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let level = std::env::var("FORMWORK_LOG")
            .ok()
            .and_then(|v| v.parse::<tracing::Level>().ok())
            .unwrap_or(tracing::Level::DEBUG);
        if tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_target(true)
            .try_init()
            .is_err()
        {
            tracing::debug!("a global subscriber was already installed");
        }
    });
}
