//! The configuration of a [`NekosClient`](crate::api::NekosClient).
//!
//! See [`DEFAULT_CONFIG_STR`] for the documented defaults.

use serde::Deserialize;
pub use validator::Validate;

use crate::api::params::{MAX_AMOUNT, MIN_AMOUNT};

/// The bundled default configuration, in TOML.
pub const DEFAULT_CONFIG_STR: &str = include_str!("default.toml");

/// How to reach the API, and the defaults of the command line.
#[non_exhaustive]
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// The root every endpoint is appended to.
    #[validate(url(message = "base_url must be a valid url"))]
    pub base_url: String,
    /// The number of results requested when none is given. Range: `1..=20`.
    #[validate(range(
        min = MIN_AMOUNT,
        max = MAX_AMOUNT,
        message = "amount must be between 1 and 20"
    ))]
    pub amount: u32,
    /// Seconds before a request is abandoned, `0` disables the timeout.
    pub timeout: u64,
}

#[cfg(feature = "__toml")]
impl Config {
    /// Parse and validate a TOML configuration.
    ///
    /// # Errors
    ///
    /// If `content` is not valid TOML, misses a field, or fails validation,
    /// this function will return an error.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Config>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// See [`Self::from_toml`], or the file cannot be read.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::api::NekosClient;

    #[test]
    fn test_parse_default_config() -> anyhow::Result<()> {
        let config = Config::from_toml(DEFAULT_CONFIG_STR)?;
        let client = NekosClient::from_config(&config)?;
        assert_eq!(client.base_url().as_str(), crate::api::url::BASE_URL);
        Ok(())
    }

    #[test]
    fn test_parse_invalid_amount() {
        let toml = r#"
            base_url = "https://nekos.best/api/v2/"
            amount = 21
            timeout = 10
        "#;
        Config::from_toml(toml).expect_err("amount above 20 should be invalid");
    }

    #[test]
    fn test_parse_invalid_base_url() {
        let toml = r#"
            base_url = "nekos.best"
            amount = 1
            timeout = 0
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().expect_err("relative base_url should be invalid");
    }

    #[test]
    fn test_parse_config_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"
            base_url = "http://localhost:8080/api/v2/"
            amount = 20
            timeout = 0
            "#
        )?;

        let config = Config::from_path(file.path())?;
        assert_eq!(config.amount, 20);
        assert_eq!(config.timeout, 0);
        Ok(())
    }
}
