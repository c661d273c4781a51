//! The network seam of the client.
//!
//! [`crate::api::NekosClient`] never talks to the network directly,
//! it asks a [`Transport`] for the full body of a `GET` request.
//! [`reqwest::Client`] is the production implementation.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;

/// Performs a `GET` request and returns the whole response body.
pub trait Transport: Send + Sync {
    /// Error type for connection, protocol or status failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch `url` and collect the body.
    ///
    /// `timeout` is the caller supplied deadline for this single request,
    /// `None` leaves the decision to the implementation.
    ///
    /// # Errors
    ///
    /// If the connection fails, or the server answers with a non-success status,
    /// this function will return an error.
    fn get(
        &self,
        url: Url,
        timeout: Option<Duration>,
    ) -> impl Future<Output = Result<Bytes, Self::Error>> + Send;
}

impl Transport for reqwest::Client {
    type Error = reqwest::Error;

    async fn get(&self, url: Url, timeout: Option<Duration>) -> reqwest::Result<Bytes> {
        // the inherent `get`, not this trait method
        let mut request = reqwest::Client::get(self, url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request.send().await?.error_for_status()?.bytes().await
    }
}
