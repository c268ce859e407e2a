//! HTTP source: GETs `<base_url>/<file>` from a static file origin.
//!
//! Plain `http://` only; the connector does not negotiate TLS. Redirects are
//! followed up to [`MAX_REDIRECTS`] hops, relative `Location`s resolved
//! against the current URL. Any other non-2xx status is a failure, and the
//! whole exchange (every hop, headers and body) is bounded by the configured
//! timeout.

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use jcat_core::config::DatasetFiles;
use jcat_core::{DatasetId, DatasetSource, SourceError};
use std::time::Duration;
use url::Url;

/// Redirect hops followed before a 3xx is reported as a failure.
pub const MAX_REDIRECTS: usize = 5;

pub struct HttpSource {
    client: Client<HttpConnector, Empty<Bytes>>,
    base_url: String,
    files: DatasetFiles,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, files: DatasetFiles, timeout: Duration) -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url: base_url.into(),
            files,
            timeout,
        }
    }

    pub fn url_for(&self, dataset: DatasetId) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.files.file_for(dataset).trim_start_matches('/')
        )
    }

    async fn get(&self, url: &str) -> Result<Bytes, SourceError> {
        let mut current = url.to_string();
        let mut hops = 0;
        loop {
            let uri: hyper::Uri = current
                .parse()
                .map_err(|_| SourceError::InvalidUrl(current.clone()))?;
            let response = self
                .client
                .get(uri)
                .await
                .map_err(|e| transport(&current, &e))?;
            let status = response.status();
            if status.is_redirection() && hops < MAX_REDIRECTS {
                if let Some(location) = response.headers().get(hyper::header::LOCATION) {
                    let next = redirect_target(&current, location.as_bytes())?;
                    tracing::debug!(from = %current, to = %next, status = status.as_u16(), "following redirect");
                    current = next;
                    hops += 1;
                    continue;
                }
            }
            if !status.is_success() {
                return Err(SourceError::Status {
                    url: current.clone(),
                    status: status.as_u16(),
                });
            }
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| transport(&current, &e))?;
            return Ok(body.to_bytes());
        }
    }
}

fn transport(url: &str, err: &dyn std::fmt::Display) -> SourceError {
    SourceError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Resolve a `Location` header against the URL that answered with it.
fn redirect_target(current: &str, location: &[u8]) -> Result<String, SourceError> {
    let location = std::str::from_utf8(location)
        .map_err(|_| SourceError::InvalidUrl(String::from_utf8_lossy(location).into_owned()))?;
    Url::parse(current)
        .and_then(|base| base.join(location))
        .map(String::from)
        .map_err(|_| SourceError::InvalidUrl(location.to_string()))
}

impl DatasetSource for HttpSource {
    async fn fetch(&self, dataset: DatasetId) -> Result<Bytes, SourceError> {
        let url = self.url_for(dataset);
        tracing::debug!(%dataset, %url, "requesting dataset document");
        match tokio::time::timeout(self.timeout, self.get(&url)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                url,
                secs: self.timeout.as_secs(),
            }),
        }
    }

    fn location(&self, dataset: DatasetId) -> String {
        self.url_for(dataset)
    }
}
