use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stdout.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (for example
/// `info` or `speakai=debug`) selects what is shown. Calling this more than
/// once keeps the first subscriber.
///
/// ```
/// speakai::init_logging("info");
/// ```
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.to_ascii_lowercase()));
    let _ = fmt().with_env_filter(filter).try_init();
}
