//! Logger bootstrap.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend, defaulting to `info` when
/// `RUST_LOG` is unset.  Safe to call more than once; later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .init();
    });
}
