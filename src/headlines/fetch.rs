use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client as HttpClient, StatusCode};
use url::{form_urlencoded, Url};

/// Locale parameters appended to every search request.
const LOCALE_PARAMS: &str = "hl=en-US&gl=US&ceid=US:en";

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(url::ParseError),
    Http(reqwest::Error),
    Timeout,
    Status(StatusCode),
    Parse(rss::Error),
    #[cfg(test)]
    MockQueueEmpty,
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err)
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::InvalidUrl(err) => write!(f, "invalid feed url: {err}"),
            FetchError::Http(err) => write!(f, "http error: {err}"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Status(status) => write!(f, "http status {status}"),
            FetchError::Parse(err) => write!(f, "feed parse error: {err}"),
            #[cfg(test)]
            FetchError::MockQueueEmpty => write!(f, "mock feed queue is empty"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::InvalidUrl(err) => Some(err),
            FetchError::Http(err) => Some(err),
            FetchError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Search URL for `query`: `{base}?q=<form-encoded query>&hl=en-US&gl=US&ceid=US:en`.
pub fn search_url(base: &str, query: &str) -> Result<String, FetchError> {
    let base = Url::parse(base).map_err(FetchError::InvalidUrl)?;
    let q: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let sep = if base.query().is_some() { '&' } else { '?' };
    Ok(format!("{}{}q={}&{}", base, sep, q, LOCALE_PARAMS))
}

/// Where feed bodies come from. The live implementation is HTTP; tests
/// substitute a queue-backed mock.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, url: &str) -> Result<Bytes, FetchError>;
}

#[derive(Clone)]
pub struct HttpFeedSource {
    http: HttpClient,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::build(HttpClient::builder().timeout(timeout))
    }

    /// Ignores proxy settings from the environment; tests talk to 127.0.0.1.
    #[cfg(test)]
    pub fn direct(timeout: Duration) -> Result<Self, FetchError> {
        Self::build(HttpClient::builder().timeout(timeout).no_proxy())
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self, FetchError> {
        let http = builder.build().map_err(FetchError::from_reqwest)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_feed(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.http.get(url).send().await.map_err(FetchError::from_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        response.bytes().await.map_err(FetchError::from_reqwest)
    }
}

#[cfg(test)]
pub use mock::MockFeedSource;
