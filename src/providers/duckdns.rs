//! DuckDNS provider.
//!
//! API: <https://www.duckdns.org/spec.jsp>

use super::{build_client, encode, fetch};
use crate::config::UpdateOptions;
use crate::error::{DdnsError, Result};
use crate::output::Echo;
use std::collections::BTreeSet;

/// Production DuckDNS endpoint.
pub const DUCKDNS_URL: &str = "https://www.duckdns.org";

/// DuckDNS provider.
pub struct DuckDnsProvider {
    client: reqwest::Client,
    base_url: String,
    options: UpdateOptions,
    echo: Echo,
}

impl DuckDnsProvider {
    /// Create a new DuckDNS provider.
    pub fn new(options: UpdateOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(&options)?,
            base_url: DUCKDNS_URL.to_string(),
            options,
            echo: Echo::stdout(),
        })
    }

    /// Send requests somewhere other than duckdns.org.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Write verbose output somewhere other than stdout.
    pub fn with_echo(mut self, echo: Echo) -> Self {
        self.echo = echo;
        self
    }

    /// Build the update URL.
    ///
    /// Domains are encoded, deduplicated and sorted so the same set always
    /// yields the same request.
    pub fn update_url(&self, token: &str, domains: &[String], ip: Option<&str>) -> Result<String> {
        let mut encoded = BTreeSet::new();
        for domain in domains {
            if domain.contains(',') {
                return Err(DdnsError::InvalidDomain(domain.clone()));
            }
            encoded.insert(encode(domain));
        }
        let domains = encoded.into_iter().collect::<Vec<_>>().join(",");

        let mut url = format!(
            "{}/update?token={}&domains={}",
            self.base_url,
            encode(token),
            domains
        );
        if let Some(ip) = ip.filter(|ip| !ip.is_empty()) {
            url.push_str("&ip=");
            url.push_str(&encode(ip));
        }
        if self.options.server_verbose() {
            url.push_str("&verbose=true");
        }
        Ok(url)
    }

    /// Point `domains` at `ip`, or at the caller's address when `ip` is
    /// `None` or empty.
    pub async fn update(&self, token: &str, domains: &[String], ip: Option<&str>) -> Result<()> {
        let url = self.update_url(token, domains, ip)?;
        if self.options.echo() {
            self.echo.line(format_args!("# url: {}", url))?;
        }

        let body = fetch(&self.client, &url).await?;
        if !body.is_ascii() {
            return Err(DdnsError::NotAscii { url });
        }
        let text = String::from_utf8_lossy(&body);

        if self.options.echo() {
            self.echo.line(format_args!("# Response data:"))?;
            self.echo.line(format_args!("{:?}", text))?;
        }

        if !text.starts_with("OK") {
            return Err(DdnsError::Rejected {
                token: token.to_string(),
                domains: domains.to_vec(),
            });
        }

        tracing::info!("Updated {} DuckDNS domain(s)", domains.len());
        Ok(())
    }
}
