pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `directive` is used, falling back to
/// `info` when it does not parse.
pub fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber installed by the host application takes precedence.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
