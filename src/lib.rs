//! # ddns-update
//!
//! Command-line updaters for two Dynamic DNS services:
//!
//! - [DuckDNS](https://www.duckdns.org): one request updates any number of
//!   domains behind a single token.
//! - [FreeDNS](https://freedns.afraid.org): one Sync v2 request per token,
//!   with a short pause between tokens.
//!
//! ## Usage
//!
//! ```bash
//! # Point two DuckDNS domains at the caller's address
//! duckdns-update -d home -d lab "$DUCKDNS_TOKEN"
//!
//! # Force an address and show the request and response
//! duckdns-update -v -i 203.0.113.7 -d home '$DUCKDNS_TOKEN'
//!
//! # Sync several FreeDNS tokens
//! freedns-update -t 5 token-one token-two
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pause;
pub mod providers;

pub use config::UpdateOptions;
pub use error::{DdnsError, ErrorKind, Result};
pub use output::Echo;
pub use pause::{Pause, TokioPause};
pub use providers::{DuckDnsProvider, FreeDnsProvider};
