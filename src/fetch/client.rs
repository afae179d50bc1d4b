//! Outbound HTTP with a fixed per-attempt timeout and a bounded retry budget.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use url::Url;

use crate::error::{AppError, AppResult};

/// Shared client: one connection pool and cookie jar for every request.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, max_retries: u32) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to build HTTP client");
                AppError::Internal
            })?;

        Ok(HttpFetcher {
            client,
            max_retries,
        })
    }

    /// GET `url`, retrying transport failures up to the retry budget.
    ///
    /// Any HTTP response, whatever its status, ends the attempt loop.
    pub async fn get(&self, url: &Url) -> Result<Response, reqwest::Error> {
        let mut attempt = 0u32;
        loop {
            let result = self
                .client
                .get(url.clone())
                .header(ACCEPT, "*/*")
                .send()
                .await;

            match result {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        url = %url,
                        attempt,
                        max_retries = self.max_retries,
                        "Transient fetch failure, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Read at least `limit` bytes of the body (or all of it, if shorter).
pub async fn read_prefix(response: &mut Response, limit: usize) -> reqwest::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(limit);
    while buf.len() < limit {
        match response.chunk().await? {
            Some(chunk) => buf.extend_from_slice(&chunk),
            None => break,
        }
    }
    Ok(buf)
}

/// Drain the remaining body onto `buf`.
pub async fn read_rest(response: &mut Response, buf: &mut Vec<u8>) -> reqwest::Result<()> {
    while let Some(chunk) = response.chunk().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(())
}
