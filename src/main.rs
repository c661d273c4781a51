use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};
use reqwest::Url;
use serde::Serialize;
use tokio::runtime::Runtime;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use nekos_best::api::data::{CategoryList, Media, Source};
use nekos_best::api::NekosClient;
use nekos_best::cli::{Cli, Command, Parser};
use nekos_best::config::Config;

const SPINNER_FINISH_MODE: ProgressFinish = ProgressFinish::AndClear;
const SPINNER_TICK_SECS: f32 = 0.1;
const DEFAULT_LOG_FILTER: &str = "warn";

#[inline]
fn build_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner()
        .with_finish(SPINNER_FINISH_MODE)
        .with_style(
            ProgressStyle::with_template("{spinner:.magenta} {msg}")
                .unwrap()
                // NOTE: use `ascii` only, because cmd/powershell maybe not support unicode.
                .tick_strings(&[".  ", ".. ", "...", " ..", "  .", "   "]),
        )
        .with_message(msg);
    spinner.enable_steady_tick(Duration::from_secs_f32(SPINNER_TICK_SECS));
    spinner
}

#[inline]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize results")?;
    println!("{json}");
    Ok(())
}

fn print_categories(categories: &CategoryList, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(categories);
    }
    for category in categories {
        println!("{}\t{}", category.name, category.format);
    }
    Ok(())
}

fn print_results(results: &[Media], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&results);
    }
    // HACK: This is not considered an error.
    if results.is_empty() {
        println!("No result found.");
    }
    for media in results {
        println!("- {}", media.url);
        match &media.source {
            Source::Image(source) => println!(
                "  artist: {} ({})\n  source: {}",
                source.artist_name, source.artist_href, source.source_url
            ),
            Source::Animation(source) => println!("  anime: {}", source.anime_name),
        }
    }
    Ok(())
}

/// The file name of a download when `--output` is not given.
fn default_output(url: &str) -> anyhow::Result<PathBuf> {
    let url = Url::parse(url).with_context(|| format!("invalid url: {url}"))?;
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .with_context(|| format!("cannot infer a file name from {url}, use `--output`"))
}

#[inline]
async fn async_main(cli: Cli, config: Config) -> anyhow::Result<()> {
    let client = NekosClient::from_config(&config).context("failed to build the client")?;

    match cli.command {
        Command::Categories => {
            let spinner = build_spinner("Fetching categories from nekos.best...");
            let categories = client
                .list_categories()
                .await
                .context("failed to list categories")?;
            spinner.finish_and_clear();
            print_categories(&categories, cli.json)?;
        }
        Command::Category { name, amount } => {
            let spinner = build_spinner("Fetching results from nekos.best...");
            let categories = client
                .list_categories()
                .await
                .context("failed to list categories")?;
            let category = categories
                .find(&name)
                .with_context(|| format!("there is no category named `{name}`"))?;
            let results = client
                .fetch_category(category, amount.or_default(&config))
                .await
                .with_context(|| format!("failed to fetch category `{name}`"))?;
            spinner.finish_and_clear();
            print_results(&results, cli.json)?;
        }
        Command::Search {
            query,
            amount,
            format,
            category,
        } => {
            let spinner = build_spinner("Searching nekos.best...");
            let categories = match category {
                Some(_) => Some(
                    client
                        .list_categories()
                        .await
                        .context("failed to list categories")?,
                ),
                None => None,
            };
            let category = match (&category, &categories) {
                (Some(name), Some(categories)) => Some(
                    categories
                        .find(name)
                        .with_context(|| format!("there is no category named `{name}`"))?,
                ),
                _ => None,
            };
            let results = client
                .search(&query, amount.or_default(&config), format, category)
                .await
                .with_context(|| format!("failed to search `{query}`"))?;
            spinner.finish_and_clear();
            print_results(&results, cli.json)?;
        }
        Command::Download { url, output } => {
            let output = match output {
                Some(output) => output,
                None => default_output(&url)?,
            };
            let spinner = build_spinner("Downloading from nekos.best...");
            let bytes = client
                .download(&url)
                .await
                .with_context(|| format!("failed to download {url}"))?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("failed to write {}", output.display()))?;
            spinner.finish_and_clear();
            println!(
                "{} ({})",
                output.display(),
                indicatif::HumanBytes(bytes.len() as u64)
            );
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    // here, if parse fails, the program will exit early, and no `Drop` will be called,
    // but it's okay, because we don't need to clean up anything.
    let cli = Cli::parse();
    let config = cli.config().context("invalid bundled config")?;

    init_tracing();

    let runtime = Runtime::new().context("failed to build tokio runtime")?;
    runtime.block_on(async {
        tokio::select! {
            result = async_main(cli, config) => {result},
            result = signal::ctrl_c() => {
                result.expect("failed to listen for ctrl-c signal");
                println!("Ctrl-C received, exiting...");
                Ok(())
            },
        }
    })?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() -> anyhow::Result<()> {
        let path = default_output("https://nekos.best/api/v2/neko/0001.png")?;
        assert_eq!(path, PathBuf::from("0001.png"));

        default_output("https://nekos.best/").expect_err("no file name in url");
        Ok(())
    }
}
