use crate::error::ConfigurationError;
use crate::util;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const FALLBACK_PORT: u16 = 8000;

fn default_port() -> u16 {
    port_or_fallback(env::var("PORT").ok())
}

fn port_or_fallback(raw: Option<String>) -> u16 {
    let Some(raw) = raw.filter(|it| !it.is_empty()) else {
        return FALLBACK_PORT;
    };

    match raw.trim().parse() {
        Ok(port) => port,
        Err(e) => {
            tracing::warn!(
                "Ignoring PORT={:?} ({}), listening on {} instead",
                raw,
                e,
                FALLBACK_PORT
            );
            FALLBACK_PORT
        }
    }
}

fn default_database_url() -> Option<String> {
    util::env_non_empty("DATABASE_URL")
}

fn default_database_name() -> Option<String> {
    util::env_non_empty("DATABASE_NAME")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: Option<String>,
    #[serde(default = "default_database_name")]
    pub database_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            database_url: default_database_url(),
            database_name: default_database_name(),
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        let config_file = util::find_first_subpath(
            config_dir(),
            &["settings.yml", "settings.yaml"],
            Path::exists,
        )
        .ok_or_else(|| ConfigurationError::NotFound(config_dir()))?;

        let file = File::open(config_file)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;

        Ok(config)
    }

    /// Connection details for the document store, present only when both the
    /// URL and the database name are configured.
    pub fn database(&self) -> Option<(&str, &str)> {
        match (&self.database_url, &self.database_name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }
}
