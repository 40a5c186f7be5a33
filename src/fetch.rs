//! Page fetching
//!
//! The HTTP transport is an external collaborator: the monitor only needs
//! "give me the listing body for this URL". Tests swap in an in-memory
//! [`PageSource`] so no cycle logic ever touches the network.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch for {url} failed: {reason}")]
    Unavailable { url: String, reason: String },
}

/// Source of directory-listing pages
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Real HTTP fetcher backed by reqwest
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("repowatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}
