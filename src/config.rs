use std::str::FromStr;

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `APPPOINT_METRICS_PORT`: serve Prometheus metrics when set.
    pub metrics_port: Option<u16>,
    /// `APPPOINT_MAX_AUTO_SHIFTS`: how many next-day offers a client gets
    /// per booking. Unset means no cap.
    pub max_auto_shifts: Option<usize>,
    /// `APPPOINT_LOG_JSON`: emit logs as JSON lines.
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            metrics_port: parsed(&lookup, "APPPOINT_METRICS_PORT"),
            max_auto_shifts: parsed(&lookup, "APPPOINT_MAX_AUTO_SHIFTS"),
            log_json: lookup("APPPOINT_LOG_JSON")
                .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
