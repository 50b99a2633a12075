//! Shared test harness: canned configuration, a mock backend invoker,
//! and a fixed account directory

pub mod backend;
pub mod config;
pub mod directory;

/// Install the logging subscriber once per test binary
pub fn init_logging() {
    tollgate_telemetry::init(None).ok();
}
