use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::error::Error;
use crate::model::Target;
use crate::prober::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

pub const CONFIG_PATH_VAR: &str = "WEBSITE_CHECKER_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProbeOptions,
    #[serde(default)]
    pub alert: AlertOptions,
    #[serde(default)]
    pub websites: Vec<Target>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProbeOptions {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout_ms: u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(10_000),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProbeOptions {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl AlertOptions {
    /// Sender and recipient, only when both are configured.
    #[must_use]
    pub fn addresses(&self) -> Option<(&str, &str)> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

impl Config {
    /// Resolves the configuration file location.
    ///
    /// `WEBSITE_CHECKER_CONFIG` wins over the user's config directory.
    ///
    /// # Errors
    ///
    /// Fails when neither is available.
    pub fn default_path() -> Result<PathBuf, Error> {
        if let Ok(path) = dotenvy::var(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("website-checker").join("config.toml"))
            .ok_or_else(|| Error::Config("could not determine the config directory".to_string()))
    }

    /// Loads the configuration file, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or holds invalid settings.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        config.apply_env_overrides(|key| dotenvy::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// # Errors
    ///
    /// Fails when `content` is not valid TOML or does not match the layout.
    pub fn parse(content: &str) -> Result<Config, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Alert settings from the environment take precedence over the file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let alert = &mut self.alert;
        for (key, slot) in [
            ("ALERT_EMAIL_FROM", &mut alert.from),
            ("ALERT_EMAIL_TO", &mut alert.to),
            ("ALERT_ENDPOINT", &mut alert.endpoint),
            ("ALERT_API_KEY", &mut alert.api_key),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }
    }

    /// # Errors
    ///
    /// Fails on a zero timeout or an alert endpoint that is not a URL.
    pub fn validate(&self) -> Result<(), Error> {
        if self.probe.timeout_ms == 0 {
            return Err(Error::Config(
                "probe.timeout_ms must be greater than zero".to_string(),
            ));
        }

        if let Some(endpoint) = &self.alert.endpoint {
            Url::parse(endpoint)?;
        }

        Ok(())
    }
}
