use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with console output.
///
/// `RUST_LOG` overrides the default crate-level `info` directive.
pub fn init_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("aaisp_exporter=info".parse().unwrap()))
        .with(console_layer)
        .init();
}
