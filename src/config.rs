//! Console configuration.
//!
//! Settings come in three layers: built-in defaults, an optional TOML file,
//! and `STATIONWATCH_*` environment variables, each overriding the previous
//! one. Command-line flags override all of these in `main`.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Config file picked up from the working directory when no `--config` was
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "stationwatch.toml";

/// Settings for the console binary.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the estation server.
    pub server: String,
    /// Path the mirrored HTML document is written to.
    pub out: String,
    /// Health polling period in seconds.
    pub health_every: u64,
    /// Live-feed polling period in seconds.
    pub live_every: u64,
}

impl ConsoleConfig {
    /// Load configuration, with `path` forcing a specific (required) file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server", "http://127.0.0.1:8080/")?
            .set_default("out", "stationwatch.html")?
            .set_default("health_every", 30_u64)?
            .set_default("live_every", 5_u64)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix("STATIONWATCH"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = ConsoleConfig::load(None).unwrap();
        assert_eq!(cfg.server, "http://127.0.0.1:8080/");
        assert_eq!(cfg.out, "stationwatch.html");
        assert_eq!(cfg.health_every, 30);
        assert_eq!(cfg.live_every, 5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "server = \"http://sensors.local:8080/\"").unwrap();
        writeln!(file, "live_every = 2").unwrap();

        let cfg = ConsoleConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.server, "http://sensors.local:8080/");
        assert_eq!(cfg.live_every, 2);
        // Unset keys keep their defaults.
        assert_eq!(cfg.health_every, 30);
    }

    #[test]
    fn test_missing_forced_file_is_an_error() {
        assert!(ConsoleConfig::load(Some(Path::new("/no/such/file.toml"))).is_err());
    }
}
