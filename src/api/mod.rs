//! A core module for interacting with the nekos.best API.
//!
//! Usually, you prefer to use the [`NekosClient`] struct to get the [`data`] from the API.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::Transport;

pub mod data;
pub mod mapper;
pub mod params;
pub mod url;

use data::{Category, CategoryList, Format, Media};
use params::{CategoryParams, SearchParams};

/// The entry point of the nekos.best API.
///
/// Every operation sends exactly one request and keeps no state between calls,
/// so a client can be shared freely between tasks.
///
/// # Example
///
/// ```no_run
/// use nekos_best::api::NekosClient;
///
/// #[tokio::main]
/// async fn main() -> nekos_best::error::Result<()> {
///     let client = NekosClient::new(reqwest::Client::new());
///
///     let categories = client.list_categories().await?;
///     let neko = categories.find("neko").expect("`neko` is always available");
///     let results = client.fetch_category(neko, 4).await?;
///
///     for media in &results {
///         let bytes = client.download(&media.url).await?;
///         println!("{}: {} bytes", media.url, bytes.len());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NekosClient<T = reqwest::Client> {
    transport: T,
    base_url: Url,
    timeout: Option<Duration>,
}

impl NekosClient<reqwest::Client> {
    /// Build a [`reqwest::Client`] backed client from a [`Config`].
    ///
    /// # Errors
    ///
    /// If `config.base_url` is not a URL, or the reqwest client cannot be built,
    /// this function will return an error.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client_builder = reqwest::Client::builder();
        let client_builder = if config.timeout > 0 {
            client_builder.timeout(Duration::from_secs(config.timeout))
        } else {
            client_builder
        };
        let client = client_builder
            .build()
            .map_err(|err| Error::Transport(Box::new(err)))?;
        Ok(Self::new(client).with_base_url(base_url))
    }
}

impl<T: Transport> NekosClient<T> {
    /// Create a client targeting [`url::BASE_URL`].
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: url::API_URL.clone(),
            timeout: None,
        }
    }

    /// Target another deployment of the API, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Give up on any single request after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The base URL every endpoint is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get(&self, url: Url) -> Result<Bytes> {
        tracing::debug!(%url, "sending request");
        let body = self
            .transport
            .get(url, self.timeout)
            .await
            .map_err(|err| Error::Transport(Box::new(err)))?;
        tracing::trace!(len = body.len(), "received response");
        Ok(body)
    }

    /// List the categories currently exposed by the API.
    ///
    /// # Errors
    ///
    /// If the request fails, or the response is not a map of categories,
    /// this function will return an error.
    pub async fn list_categories(&self) -> Result<CategoryList> {
        let body = self.get(url::categories(&self.base_url)?).await?;
        let categories = mapper::categories(&body)?;
        tracing::debug!(len = categories.len(), "mapped categories");
        Ok(categories)
    }

    /// Fetch `amount` random results of `category`.
    ///
    /// The results carry the source metadata of `category.format`.
    ///
    /// # Errors
    ///
    /// If `amount` is not in the range `1..=20`, or the name of `category` is empty,
    /// this function will return [`Error::InvalidParameter`] without sending any request.
    ///
    /// If the request fails, or the response does not match `category.format`,
    /// this function will return an error.
    pub async fn fetch_category(&self, category: &Category, amount: u32) -> Result<Vec<Media>> {
        let CategoryParams { category, amount, .. } = CategoryParams::build(category, amount)?;

        let target_url = url::category(&self.base_url, &category.name, amount)?;
        let body = self.get(target_url).await?;
        let results = mapper::results(&body, category.format)?;
        tracing::debug!(category = %category.name, len = results.len(), "mapped results");
        Ok(results)
    }

    /// Search `amount` results of `format` whose source matches `query`,
    /// optionally within `category`.
    ///
    /// The results carry the source metadata of `format`, whatever the format of `category` is.
    ///
    /// # Errors
    ///
    /// If `amount` is not in the range `1..=20`, `query` is not 3 to 150
    /// characters long, or the name of `category` is empty, this function will
    /// return [`Error::InvalidParameter`] without sending any request.
    ///
    /// If the request fails, or the response does not match `format`,
    /// this function will return an error.
    pub async fn search(
        &self,
        query: &str,
        amount: u32,
        format: Format,
        category: Option<&Category>,
    ) -> Result<Vec<Media>> {
        let SearchParams {
            query,
            amount,
            format,
            category,
            ..
        } = SearchParams::build(query, amount, format, category)?;

        let target_url = url::search(&self.base_url, query, amount, format, category)?;
        let body = self.get(target_url).await?;
        let results = mapper::results(&body, format)?;
        tracing::debug!(%format, len = results.len(), "mapped search results");
        Ok(results)
    }

    /// Download the raw body behind `url`, usually a [`Media::url`].
    ///
    /// # Errors
    ///
    /// If `url` cannot be parsed, or the request fails, this function will return an error.
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        let target_url = Url::parse(url)?;
        self.get(target_url).await
    }
}
