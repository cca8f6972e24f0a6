//! Server settings read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `TASK_CONSOLE_HOST` | `127.0.0.1` |
//! | `TASK_CONSOLE_PORT` | `8080` |
//! | `TASK_CONSOLE_OPEN_BROWSER` | `true` |
//! | `TASK_CONSOLE_SCOPES` | empty; `id=Name,id=Name` |
//! | `TASK_CONSOLE_STEP_MS` | `250` |

use common::model::task::normalize_scope;
use common::requests::ScopeNames;
use log::warn;
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the console in the default browser once the server is up.
    pub open_browser: bool,
    /// Display names served by `/api/scopes`.
    pub scopes: ScopeNames,
    /// Delay between two progress reports of the batch executors.
    pub step: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
            scopes: ScopeNames::new(),
            step: Duration::from_millis(250),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("TASK_CONSOLE_HOST").unwrap_or(defaults.host),
            port: parse_or("TASK_CONSOLE_PORT", lookup("TASK_CONSOLE_PORT"), defaults.port),
            open_browser: parse_or(
                "TASK_CONSOLE_OPEN_BROWSER",
                lookup("TASK_CONSOLE_OPEN_BROWSER"),
                defaults.open_browser,
            ),
            scopes: lookup("TASK_CONSOLE_SCOPES")
                .map(|raw| parse_scopes(&raw))
                .unwrap_or(defaults.scopes),
            step: lookup("TASK_CONSOLE_STEP_MS")
                .map(|raw| Duration::from_millis(parse_or("TASK_CONSOLE_STEP_MS", Some(raw), 250)))
                .unwrap_or(defaults.step),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

/// Parses `proj-42=Acme Social,GLOBAL=Todas las cuentas`. Malformed entries are skipped.
pub fn parse_scopes(raw: &str) -> ScopeNames {
    raw.split(',')
        .filter_map(|entry| {
            let (id, name) = entry.split_once('=')?;
            let (id, name) = (id.trim(), name.trim());
            if id.is_empty() || name.is_empty() {
                warn!("ignoring scope entry {:?}", entry);
                return None;
            }
            Some((normalize_scope(id), name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_environment() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(config.open_browser);
        assert!(config.scopes.is_empty());
        assert_eq!(config.step, Duration::from_millis(250));
    }

    #[test]
    fn test_reads_overrides_and_skips_invalid_values() {
        let vars: HashMap<&str, &str> = [
            ("TASK_CONSOLE_PORT", "9090"),
            ("TASK_CONSOLE_OPEN_BROWSER", "nope"),
            ("TASK_CONSOLE_SCOPES", "proj-42=Acme Social, global=Todas,broken"),
            ("TASK_CONSOLE_STEP_MS", "5"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.port, 9090);
        assert!(config.open_browser);
        assert_eq!(config.step, Duration::from_millis(5));
        assert_eq!(config.scopes.get("proj-42").map(String::as_str), Some("Acme Social"));
        assert_eq!(config.scopes.get("GLOBAL").map(String::as_str), Some("Todas"));
        assert_eq!(config.scopes.len(), 2);
    }
}
