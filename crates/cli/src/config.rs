//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name, falling back to `Pretty` for unknown values.
    fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CATALOG_PATH` — product catalog file (default: `"catalog.json"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `CART_PRINT_METRICS` — `true`/`1` dumps Prometheus metrics to stderr
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
    pub print_metrics: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            catalog_path: lookup("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse_or_default(&v))
                .unwrap_or(defaults.log_format),
            print_metrics: lookup("CART_PRINT_METRICS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.print_metrics),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.json"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            print_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CATALOG_PATH", "/srv/shop/products.json"),
            ("RUST_LOG", "domain=debug"),
            ("LOG_FORMAT", "JSON"),
            ("CART_PRINT_METRICS", "1"),
        ]));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/shop/products.json"));
        assert_eq!(config.log_level, "domain=debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_unknown_log_format_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")]));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
