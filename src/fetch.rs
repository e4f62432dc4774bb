//! APOD API client.
//!
//! One request per call: `GET <endpoint>?api_key=..&start_date=..&end_date=..`,
//! body parsed as a JSON array of [`ImageRecord`]s and returned in the order
//! the API sent them. Every failure (URL, transport, HTTP status, body) comes
//! back as a [`FetchError`]; nothing is retried.
//!
//! [`ApodSource`] is the seam the controller depends on, so that the HTTP
//! client can be swapped for an in-memory source in tests.

use crate::config::ApiConfig;
use crate::types::{ImageRecord, RecordSet};
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Anything that can produce the APOD records for a date range.
pub trait ApodSource {
    fn fetch_images(&self, start_date: &str, end_date: &str)
    -> Result<Vec<ImageRecord>, FetchError>;
}

/// Build the request URL for a date range.
pub fn request_url(
    endpoint: &str,
    api_key: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Url, FetchError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("start_date", start_date)
        .append_pair("end_date", end_date);
    Ok(url)
}

/// Blocking HTTP client for the APOD endpoint.
pub struct ApodClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl ApodSource for ApodClient {
    fn fetch_images(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let url = request_url(&self.endpoint, &self.api_key, start_date, end_date)?;
        // Log the endpoint, not `url`: the query carries the credential.
        debug!(endpoint = %self.endpoint, start_date, end_date, "requesting APOD range");

        let body = self.http.get(url).send()?.error_for_status()?.text()?;
        let records: Vec<ImageRecord> = serde_json::from_str(&body)?;

        debug!(count = records.len(), "received APOD records");
        Ok(records)
    }
}

/// A saved snapshot answers with the records it holds, whatever the range.
impl ApodSource for RecordSet {
    fn fetch_images(
        &self,
        _start_date: &str,
        _end_date: &str,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        Ok(self.records.clone())
    }
}
