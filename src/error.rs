//! Error types for ddns-update.

use std::fmt;
use thiserror::Error;

/// Result type alias for ddns-update.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// Broad class of a [`DdnsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input detected before any request was sent.
    Validation,
    /// The provider could not be reached.
    Transport,
    /// The provider answered, but not with its success marker.
    Protocol,
    /// Some FreeDNS targets reported a failing status code.
    PartialFailure,
    /// Verbose output could not be written.
    Output,
}

/// DDNS update errors.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Domain name contains the DuckDNS list separator.
    #[error("commas not allowed in domain name '{0}'")]
    InvalidDomain(String),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// DNS, connection or timeout failure.
    #[error("request error {source} for url='{url}'")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with something other than 200 OK.
    #[error("bad status={status} for url='{url}'")]
    BadStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Provider answered with an empty body.
    #[error("no response from server")]
    EmptyResponse,

    /// DuckDNS answered with bytes outside of ASCII.
    #[error("non-ASCII response for url='{url}'")]
    NotAscii { url: String },

    /// DuckDNS did not answer with `OK`.
    #[error("failed token='{}' domains=[{}]", .token, quoted_list(.domains))]
    Rejected { token: String, domains: Vec<String> },

    /// FreeDNS answered with something that is not a sync document.
    #[error("invalid response {source} for url='{url}'")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// FreeDNS targets outside of the changed/unchanged status codes.
    #[error("{}", join_failures(.0))]
    TargetsFailed(Vec<TargetFailure>),

    /// Verbose output stream failed for a reason other than a closed pipe.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl DdnsError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DdnsError::InvalidDomain(_) => ErrorKind::Validation,
            DdnsError::Client(_) | DdnsError::Transport { .. } => ErrorKind::Transport,
            DdnsError::BadStatus { .. }
            | DdnsError::EmptyResponse
            | DdnsError::NotAscii { .. }
            | DdnsError::Rejected { .. }
            | DdnsError::Decode { .. } => ErrorKind::Protocol,
            DdnsError::TargetsFailed(_) => ErrorKind::PartialFailure,
            DdnsError::Output(_) => ErrorKind::Output,
        }
    }
}

/// A single FreeDNS target that failed to update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub host: String,
    pub status: String,
}

impl fmt::Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host='{}' status='{}'", self.host, self.status)
    }
}

/// Render names as `['a', 'b']`.
fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_failures(failures: &[TargetFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_failures_join() {
        let err = DdnsError::TargetsFailed(vec![
            TargetFailure {
                host: "a.example".to_string(),
                status: "Abuse".to_string(),
            },
            TargetFailure {
                host: "b.example".to_string(),
                status: "Error".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "host='a.example' status='Abuse'; host='b.example' status='Error'"
        );
        assert_eq!(err.kind(), ErrorKind::PartialFailure);
    }

    #[test]
    fn test_rejected_names_token_and_domains() {
        let err = DdnsError::Rejected {
            token: "tok".to_string(),
            domains: vec!["home".to_string(), "lab".to_string()],
        };
        assert_eq!(err.to_string(), "failed token='tok' domains=['home', 'lab']");
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_invalid_domain_is_validation() {
        let err = DdnsError::InvalidDomain("a,b".to_string());
        assert_eq!(err.to_string(), "commas not allowed in domain name 'a,b'");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
