use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

/// Environment variable holding the log filter, e.g. `FORGE_LOG=forge_wm=debug`.
pub const LOG_ENV: &str = "FORGE_LOG";

pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let tree = HierarchicalLayer::new(2)
        .with_writer(std::io::stderr)
        .with_targets(true)
        .with_bracketed_fields(true);
    // Fails only if a subscriber is already installed, which is fine.
    _ = tracing_subscriber::registry().with(filter).with(tree).try_init();
}
