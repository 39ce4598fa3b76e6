//! Tracing subscriber setup for drivers and tests.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per process.
///
/// Does nothing unless `RUST_LOG` is set. With `KESTREL_LOG_TREE` also set,
/// spans are rendered as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("KESTREL_LOG_TREE")
            .map(|_| HierarchicalLayer::new(2).with_targets(true));
        let flat = tree
            .is_none()
            .then(|| fmt::layer().with_target(true).with_level(true));

        // Another subscriber may already be installed by the embedding driver.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tree)
            .with(flat)
            .try_init();
    });
}
