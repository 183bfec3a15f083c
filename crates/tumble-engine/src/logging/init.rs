use std::sync::Once;

/// Filter used when neither the caller nor `RUST_LOG` names one. The wgpu
/// internals log every resource creation at info, so they are held at warn.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses `env_logger` syntax, e.g. `"debug"` or
/// `"tumble_engine=trace,wgpu_core=warn"`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

/// Explicit filter, else `RUST_LOG`, else [`DEFAULT_FILTER`]. Blank strings
/// count as unset.
pub fn resolve_filter(explicit: Option<&str>, env: Option<&str>) -> String {
    [explicit, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend. Only the first call has any
/// effect; call it at the top of `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(config.env_filter.as_deref(), env.as_deref());

        let installed = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init();

        // A test harness may have installed its own logger already.
        if installed.is_ok() {
            log::debug!("logging initialized ({filter})");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(resolve_filter(Some("debug"), Some("trace")), "debug");
    }

    #[test]
    fn env_filter_used_when_no_explicit_one() {
        assert_eq!(resolve_filter(None, Some("tumble_engine=trace")), "tumble_engine=trace");
    }

    #[test]
    fn blank_filters_fall_through() {
        assert_eq!(resolve_filter(Some("  "), Some("warn")), "warn");
        assert_eq!(resolve_filter(Some(""), None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::with_filter("warn"));
        init_logging(LoggingConfig::default());
    }
}
