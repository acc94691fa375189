//! Server configuration resolved from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `PLAYGROUND_PORT` | `3000` |
//! | `PLAYGROUND_DB_PATH` | `playground.db` |
//! | `PLAYGROUND_PROJECT_ROOT` | current directory |
//! | `PLAYGROUND_RUN_SCRIPT` | `<project root>/scripts/run.sh` |
//! | `PLAYGROUND_RUN_TIMEOUT_SECS` | `30` |
//! | `PLAYGROUND_WORKSPACE_DIR` | OS temp directory |
//!
//! Values are read once at startup into [`ServerConfig`] and passed down
//! explicitly; nothing below the binary reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use playground_sandbox::ExecutorConfig;

/// Errors produced while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    /// The project root defaulted to the current directory, which is unreadable.
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces).
    pub port: u16,
    /// SQLite file backing the snippet store.
    pub db_path: String,
    /// Toolchain invocation settings.
    pub executor: ExecutorConfig,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PLAYGROUND_PORT") {
            Some(raw) => parse_var("PLAYGROUND_PORT", raw)?,
            None => 3000,
        };
        let db_path = lookup("PLAYGROUND_DB_PATH").unwrap_or_else(|| "playground.db".to_string());

        let mut executor = match lookup("PLAYGROUND_RUN_SCRIPT") {
            Some(script) => ExecutorConfig::new(script),
            None => {
                let root = match lookup("PLAYGROUND_PROJECT_ROOT") {
                    Some(root) => PathBuf::from(root),
                    None => std::env::current_dir().map_err(ConfigError::CurrentDir)?,
                };
                ExecutorConfig::for_project_root(root)
            }
        };
        if let Some(raw) = lookup("PLAYGROUND_RUN_TIMEOUT_SECS") {
            let secs: u64 = parse_var("PLAYGROUND_RUN_TIMEOUT_SECS", raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "PLAYGROUND_RUN_TIMEOUT_SECS",
                    value: "0".to_string(),
                });
            }
            executor = executor.with_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = lookup("PLAYGROUND_WORKSPACE_DIR") {
            executor = executor.with_workspace_root(dir);
        }

        Ok(ServerConfig {
            port,
            db_path,
            executor,
        })
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PLAYGROUND_PROJECT_ROOT", "/srv/app")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, "playground.db");
        assert_eq!(config.executor, ExecutorConfig::for_project_root("/srv/app"));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn project_root_defaults_to_current_dir() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(config.executor.run_script, cwd.join("scripts/run.sh"));
    }

    #[test]
    fn overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PLAYGROUND_PORT", "8080"),
            ("PLAYGROUND_DB_PATH", "/data/snippets.db"),
            ("PLAYGROUND_PROJECT_ROOT", "/ignored"),
            ("PLAYGROUND_RUN_SCRIPT", "/opt/alumina/run.sh"),
            ("PLAYGROUND_RUN_TIMEOUT_SECS", "5"),
            ("PLAYGROUND_WORKSPACE_DIR", "/scratch"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, "/data/snippets.db");
        assert_eq!(config.executor.run_script, PathBuf::from("/opt/alumina/run.sh"));
        assert_eq!(config.executor.timeout, Duration::from_secs(5));
        assert_eq!(config.executor.workspace_root, Some(PathBuf::from("/scratch")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("PLAYGROUND_PORT", "http")])).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { var: "PLAYGROUND_PORT", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("PLAYGROUND_PROJECT_ROOT", "/srv/app"),
            ("PLAYGROUND_RUN_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "{err:?}");
    }
}
