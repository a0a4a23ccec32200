//! FreeDNS (afraid.org) provider, Sync v2 API.
//!
//! API: <https://freedns.afraid.org/dynamic/v2/tips/>

use super::{build_client, encode, fetch};
use crate::config::UpdateOptions;
use crate::error::{DdnsError, Result, TargetFailure};
use crate::output::Echo;
use crate::pause::{Pause, TOKEN_PAUSE};
use serde::Deserialize;

/// Production FreeDNS sync endpoint.
pub const FREEDNS_URL: &str = "http://sync.afraid.org";

/// Status code for a record that was changed.
const STATUS_CHANGED: i64 = 0;
/// Status code for a record that already held the address.
const STATUS_SAME: i64 = 100;

/// Body of a `content-type=json` sync response.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    pub targets: Vec<SyncTarget>,
}

/// One record touched by a sync token.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncTarget {
    pub host: String,
    pub statuscode: i64,
    pub statustext: String,
}

impl SyncTarget {
    fn succeeded(&self) -> bool {
        matches!(self.statuscode, STATUS_CHANGED | STATUS_SAME)
    }
}

impl SyncResponse {
    /// Collect the targets that did not update.
    pub fn failures(&self) -> Vec<TargetFailure> {
        self.targets
            .iter()
            .filter(|target| !target.succeeded())
            .map(|target| TargetFailure {
                host: target.host.clone(),
                status: target.statustext.clone(),
            })
            .collect()
    }
}

/// FreeDNS provider.
pub struct FreeDnsProvider {
    client: reqwest::Client,
    base_url: String,
    options: UpdateOptions,
    echo: Echo,
}

impl FreeDnsProvider {
    /// Create a new FreeDNS provider.
    pub fn new(options: UpdateOptions) -> Result<Self> {
        Ok(Self {
            client: build_client(&options)?,
            base_url: FREEDNS_URL.to_string(),
            options,
            echo: Echo::stdout(),
        })
    }

    /// Send requests somewhere other than sync.afraid.org.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Write verbose output somewhere other than stdout.
    pub fn with_echo(mut self, echo: Echo) -> Self {
        self.echo = echo;
        self
    }

    /// Build the sync URL for one token.
    pub fn update_url(&self, token: &str, ip: Option<&str>) -> String {
        let mut url = format!("{}/u/{}/?content-type=json", self.base_url, encode(token));
        if let Some(ip) = ip.filter(|ip| !ip.is_empty()) {
            url.push_str("&myip=");
            url.push_str(&encode(ip));
        }
        url
    }

    /// Sync every record behind `token`.
    ///
    /// Failing targets are collected, not short-circuited.
    pub async fn update(&self, token: &str, ip: Option<&str>) -> Result<()> {
        let url = self.update_url(token, ip);
        if self.options.echo() {
            self.echo.line(format_args!("# url: {}", url))?;
        }

        let body = fetch(&self.client, &url).await?;
        if self.options.echo() {
            self.echo.line(format_args!("# Response data:"))?;
            self.echo.line(format_args!("{}", String::from_utf8_lossy(&body)))?;
        }

        let response: SyncResponse = serde_json::from_slice(&body)
            .map_err(|source| DdnsError::Decode { url, source })?;

        let failures = response.failures();
        if !failures.is_empty() {
            return Err(DdnsError::TargetsFailed(failures));
        }

        tracing::info!("Synced {} FreeDNS target(s)", response.targets.len());
        Ok(())
    }

    /// Sync each token in turn, pausing between consecutive tokens.
    ///
    /// Stops at the first token that fails.
    pub async fn update_all(
        &self,
        tokens: &[String],
        ip: Option<&str>,
        pause: &dyn Pause,
    ) -> Result<()> {
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                pause.pause(TOKEN_PAUSE).await;
            }
            tracing::info!("Updating FreeDNS token {}/{}", index + 1, tokens.len());
            self.update(token, ip).await?;
        }
        Ok(())
    }
}
