use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber filtered by `BRACKEN_LOG`, then `RUST_LOG`,
/// defaulting to `warn`.
pub(crate) fn init() -> anyhow::Result<()> {
    let filter = ["BRACKEN_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|var| EnvFilter::try_from_env(var).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
