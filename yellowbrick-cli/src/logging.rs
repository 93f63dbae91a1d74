use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "yellowbrick=info";

/// Install the stderr subscriber. `RUST_LOG` overrides `filter`.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
