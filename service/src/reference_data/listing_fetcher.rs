use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::error::Error;

/// Retrieves the raw bytes of a reference listing.
///
/// Abstracted so loading and caching can be tested without network access.
#[async_trait::async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

/// Fetches listings over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpListingFetcher;

#[async_trait::async_trait]
impl ListingFetcher for HttpListingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        Ok(http_downloader::fetch_bytes(url).await?)
    }
}

/// Serves listings from memory and records every requested URL. Unknown
/// URLs fail like a missing remote file.
#[derive(Clone, Default)]
pub struct MockListingFetcher {
    responses: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    requested_urls: Arc<Mutex<Vec<String>>>,
}

impl MockListingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested_urls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ListingFetcher for MockListingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.requested_urls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::DownloadError(format!("HTTP error: 404 Not Found ({})", url)))
    }
}
