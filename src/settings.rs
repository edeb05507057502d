use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_name: String,
    pub db_compression_enabled: bool,
    pub listen_addr: String,
    /// Caps the index listing; unset lists every published question.
    #[serde(default)]
    pub index_limit: Option<usize>,
    pub log_level: log::Level,
}

impl Settings {
    /// Defaults, then `config/default.toml` if present, then `POLLS_*`
    /// environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        layered("config/default")?
            .add_source(Environment::with_prefix("POLLS").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Defaults overlaid with a single file, ignoring the environment.
    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        layered(name)?.build()?.try_deserialize()
    }

    pub fn sled_config(&self) -> sled::Config {
        sled::Config::default()
            .use_compression(self.db_compression_enabled)
            .path(&self.database_name)
    }
}

fn layered(name: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("database_name", "polls_db")?
        .set_default("db_compression_enabled", false)?
        .set_default("listen_addr", "[::1]:6666")?
        .set_default("log_level", "info")?
        .add_source(File::with_name(name).required(false)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Settings::from_file("config/does-not-exist").unwrap();
        assert_eq!(cfg.database_name, "polls_db");
        assert!(!cfg.db_compression_enabled);
        assert_eq!(cfg.index_limit, None);
        assert_eq!(cfg.log_level, log::Level::Info);
        assert!(cfg.listen_addr.parse::<std::net::SocketAddr>().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let cfg = Settings::from_file("config/fixtures/compressed").unwrap();
        assert_eq!(cfg.database_name, "fixture_db");
        assert!(cfg.db_compression_enabled);
        assert_eq!(cfg.index_limit, Some(5));
        assert_eq!(cfg.log_level, log::Level::Debug);
        assert_eq!(cfg.listen_addr, "[::1]:6666");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Settings::from_file("config/fixtures/bad_log_level").is_err());
    }
}
