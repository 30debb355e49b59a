//! Logging and tracing utilities for texinvert
//!
//! Structured logging uses the `tracing` crate. The subscriber honours
//! `RUST_LOG` and falls back to the configured default level.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize tracing with a custom configuration
///
/// Multiple calls are safe; only the first one installs a subscriber.
pub fn init_with_config(config: TracingConfig) {
    if TRACING_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
        .is_ok()
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
            .with_thread_ids(config.show_thread_ids)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number);

        // A subscriber installed by someone else (tests, embedding apps) wins.
        let _ = tracing_subscriber::registry()
            .with(fmt_layer)
            .with(filter)
            .try_init();
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default log level filter (e.g., "info", "debug", "warn")
    pub default_level: String,
    /// Show the target (module path) in log output
    pub show_target: bool,
    /// Show thread IDs in log output
    pub show_thread_ids: bool,
    /// Show source file in log output
    pub show_file: bool,
    /// Show line number in log output
    pub show_line_number: bool,
}

impl TracingConfig {
    /// Config for a `-v` count as used by the CLI
    ///
    /// 0 keeps per-file progress visible (info), each extra `-v` goes one
    /// level deeper and turns on more source detail.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let default_level = match verbosity {
            0 => "warn,texinvert=info,texinvert_export=info",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        Self {
            default_level: default_level.to_string(),
            show_target: verbosity >= 2,
            show_thread_ids: verbosity >= 3,
            show_file: verbosity >= 3,
            show_line_number: verbosity >= 3,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_verbosity(0)
    }
}

/// Log the start of work on one texture
#[macro_export]
macro_rules! log_texture_start {
    ($path:expr) => {
        tracing::info!(path = %$path.display(), "Inverting texture");
    };
}

/// Log a finished texture with dimensions and timing
#[macro_export]
macro_rules! log_texture_complete {
    ($path:expr, $width:expr, $height:expr, $duration:expr) => {
        tracing::debug!(
            path = %$path.display(),
            width = $width,
            height = $height,
            duration_ms = %$duration.as_millis(),
            "Texture written"
        );
    };
}

/// Log a texture failure
#[macro_export]
macro_rules! log_texture_error {
    ($path:expr, $error:expr) => {
        tracing::error!(
            path = %$path.display(),
            error = %$error,
            "Texture failed"
        );
    };
}
