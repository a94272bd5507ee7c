//! Shared tracing setup for the workspace binaries.

use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set, otherwise `default_filter` is used
/// (e.g. `"monthly_portfolio=info"`). Calling this twice is harmless:
/// the second install is ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    if installed.is_ok() {
        tracing::debug!("Logger initialised with default filter '{}'", default_filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init("info");
        init("debug");
    }
}
