//! Course Site CLI Library
//!
//! Command implementations for the `coursesite` binary. Each command loads a
//! course record file, works on it, and reports to stdout.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (new, edit, show, schedule, check, export)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use coursesite::cmd;
//!
//! // Export the enabled pages of a course
//! cmd::export::run(Path::new("coursesite.toml"), Path::new("cse219.toml"), None).unwrap();
//! ```

pub mod cmd;

pub use coursesite_core::{Config, CourseRecord};
pub use coursesite_generator::{ExportReport, SiteExporter};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
