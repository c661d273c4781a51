//! A core module for command line interface.
//!
//! See [`Cli`] for more information.

use std::path::PathBuf;

use clap::builder::{PathBufValueParser, TypedValueParser};
pub use clap::{CommandFactory, Parser};
use clap::{Args, Subcommand};

use crate::api::data::Format;
use crate::api::params::{MAX_AMOUNT, MIN_AMOUNT};
use crate::config::{Config, DEFAULT_CONFIG_STR};

/// [`clap`] command line interface.
///
/// The [`Self::parse`] trait will use [`toml`] to parse the config file,
/// then use [`crate::config::Validate`] to validate the config.
///
/// # Example
///
/// ```no_run
/// use nekos_best::cli::{Cli, Parser as _};
///
/// let cli = Cli::parse();
/// let config = cli.config()?;
///
/// Ok::<(), anyhow::Error>(())
/// ```
#[non_exhaustive]
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// The config file to use, the bundled defaults if omitted.
    #[arg(long, value_name = "PATH", global = true)]
    #[arg(value_parser = PathBufValueParser::new().try_map(Config::from_path))]
    pub config: Option<Config>,

    /// Print the results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// The request to send.
    #[command(subcommand)]
    pub command: Command,
}

/// What to ask the API.
#[derive(Subcommand)]
pub enum Command {
    /// List the available categories and their format.
    Categories,
    /// Fetch random results of a category.
    Category {
        /// The name of the category, e.g. `neko`.
        name: String,
        /// How many results to fetch.
        #[command(flatten)]
        amount: Amount,
    },
    /// Search results by the name of their source.
    Search {
        /// The text to search, 3 to 150 characters.
        query: String,
        /// How many results to fetch.
        #[command(flatten)]
        amount: Amount,
        /// The format of the results.
        #[arg(short, long, value_enum, default_value_t = Format::Image)]
        format: Format,
        /// Only search within this category.
        #[arg(short, long, value_name = "NAME")]
        category: Option<String>,
    },
    /// Download a file, usually the url of a result.
    Download {
        /// The url to download.
        url: String,
        /// Where to write the file, the last segment of the url if omitted.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// The number of results of a request.
#[derive(Args)]
pub struct Amount {
    /// How many results to fetch, the config's `amount` if omitted.
    #[arg(short = 'n', long = "amount", value_name = "AMOUNT")]
    #[arg(value_parser = clap::value_parser!(u32).range(i64::from(MIN_AMOUNT)..=i64::from(MAX_AMOUNT)))]
    value: Option<u32>,
}

impl Amount {
    /// The requested amount, or the default of `config`.
    pub fn or_default(&self, config: &Config) -> u32 {
        self.value.unwrap_or(config.amount)
    }
}

impl Cli {
    /// The config given by `--config`, or the bundled default one.
    ///
    /// # Errors
    ///
    /// If the bundled default config is invalid, it will return an error.
    pub fn config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(config) => Ok(config.clone()),
            None => Config::from_toml(DEFAULT_CONFIG_STR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "nekos-best",
            "search",
            "Senko",
            "-n",
            "2",
            "--format",
            "animation",
            "--category",
            "kiss",
        ])?;
        let config = cli.config()?;

        match cli.command {
            Command::Search {
                query,
                amount,
                format,
                category,
            } => {
                assert_eq!(query, "Senko");
                assert_eq!(amount.or_default(&config), 2);
                assert_eq!(format, Format::Animation);
                assert_eq!(category.as_deref(), Some("kiss"));
            }
            _ => panic!("expected the search command"),
        }
        Ok(())
    }

    #[test]
    fn test_amount_out_of_range() {
        let result = Cli::try_parse_from(["nekos-best", "category", "neko", "-n", "21"]);
        assert!(result.is_err());
    }
}
