//! DDNS provider implementations.

mod duckdns;
mod freedns;


pub use duckdns::{DuckDnsProvider, DUCKDNS_URL};
pub use freedns::{FreeDnsProvider, SyncResponse, SyncTarget, FREEDNS_URL};

use crate::config::UpdateOptions;
use crate::error::{DdnsError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;

/// Everything except unreserved characters is escaped, including `/`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single URL component.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// HTTP client honouring the configured timeout.
fn build_client(options: &UpdateOptions) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(options.timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(DdnsError::Client)
}

/// Issue a GET and return the body of a 200 response.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| DdnsError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(DdnsError::BadStatus {
            status,
            url: url.to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| DdnsError::Transport {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!("{} answered with {} bytes", url, body.len());

    if body.is_empty() {
        return Err(DdnsError::EmptyResponse);
    }

    Ok(body.to_vec())
}
