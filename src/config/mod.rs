//! Configuration module for Dericer
//!
//! - Data directory resolution
//! - User settings persistence
//! - Diagnostic logging setup for hosts embedding the library

pub mod paths;
pub mod settings;

pub use paths::DericerPaths;
pub use settings::Settings;

use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_tracing`]
pub const LOG_ENV: &str = "DERICER_LOG";

/// Install a `tracing` fmt subscriber filtered by `DERICER_LOG` (default `dericer=info`)
///
/// The library itself never installs a subscriber. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("dericer=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
