//! Server configuration
//!
//! Layered: built-in defaults, then an optional TOML file (`DINE_CONFIG`,
//! default `dine.toml`), then `DINE_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::storage::FlagEncoding;

const DEFAULT_CONFIG_FILE: &str = "dine.toml";
const ENV_PREFIX: &str = "DINE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub max_connections: u32,
    pub flag_encoding: FlagEncoding,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_path: "./database.sqlite".to_string(),
            max_connections: 5,
            flag_encoding: FlagEncoding::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("DINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let builder = Self::file_layer(Path::new(&config_path)).add_source(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file only, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        let config: Self = Self::file_layer(path).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn file_layer(path: &Path) -> config::ConfigBuilder<config::builder::DefaultState> {
        let mut builder = config::Config::builder();
        if path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }
        builder
    }

    fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            bail!("database_path must be specified");
        }
        if self.max_connections == 0 {
            bail!("max_connections must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-wide; tests touching them take this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "DINE_CONFIG",
        "DINE_BIND_ADDRESS",
        "DINE_DATABASE_PATH",
        "DINE_MAX_CONNECTIONS",
        "DINE_FLAG_ENCODING",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load_file(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.database_path, "./database.sqlite");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.flag_encoding, FlagEncoding::Text);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.toml");
        std::fs::write(
            &path,
            r#"
bind_address = "0.0.0.0:8080"
database_path = "/var/lib/dine/catalog.sqlite"
flag_encoding = "integer"
"#,
        )
        .unwrap();

        let config = ServerConfig::load_file(&path).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.database_path, "/var/lib/dine/catalog.sqlite");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.flag_encoding, FlagEncoding::Integer);
    }

    #[test]
    fn test_rejects_zero_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.toml");
        std::fs::write(&path, "max_connections = 0\n").unwrap();

        let err = ServerConfig::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn test_rejects_unknown_flag_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.toml");
        std::fs::write(&path, "flag_encoding = \"yes-no\"\n").unwrap();

        assert!(ServerConfig::load_file(&path).is_err());
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dine.toml");
        std::fs::write(
            &path,
            r#"
bind_address = "0.0.0.0:8080"
database_path = "/srv/catalog.sqlite"
"#,
        )
        .unwrap();

        env::set_var("DINE_CONFIG", &path);
        env::set_var("DINE_BIND_ADDRESS", "127.0.0.1:9090");
        env::set_var("DINE_FLAG_ENCODING", "integer");

        let result = ServerConfig::load();
        clear_env();
        let config = result.unwrap();

        // Environment beats the file
        assert_eq!(config.bind_address, "127.0.0.1:9090");
        // Environment beats the defaults
        assert_eq!(config.flag_encoding, FlagEncoding::Integer);
        // File beats the defaults
        assert_eq!(config.database_path, "/srv/catalog.sqlite");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_environment_without_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        env::set_var("DINE_CONFIG", dir.path().join("absent.toml"));
        env::set_var("DINE_MAX_CONNECTIONS", "12");

        let result = ServerConfig::load();
        clear_env();
        let config = result.unwrap();

        assert_eq!(config.max_connections, 12);
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.database_path, "./database.sqlite");
        assert_eq!(config.flag_encoding, FlagEncoding::Text);
    }
}
