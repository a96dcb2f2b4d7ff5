//! HTTP client for the flag bucket.

use std::time::Duration;

use hyper::body::Bytes;
use reqwest::StatusCode;

use super::{flag_url, FlagSource};
use crate::config::FlagsConfig;
use crate::error::Error;
use crate::lookup::Lookup;

#[derive(Debug, Clone)]
pub struct HttpFlagSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlagSource {
    pub fn new(config: &FlagsConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl FlagSource for HttpFlagSource {
    async fn fetch(&self, country: &str) -> Lookup<Bytes> {
        let url = flag_url(&self.base_url, country);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => return Lookup::UpstreamError(format!("GET {url}: {e}")),
        };

        // Only an exact 200 counts as a hit
        if response.status() != StatusCode::OK {
            return Lookup::NotFound;
        }

        match response.bytes().await {
            Ok(body) => Lookup::Found(body),
            Err(e) => Lookup::UpstreamError(format!("reading {url}: {e}")),
        }
    }
}
