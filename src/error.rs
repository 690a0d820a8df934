use std::fmt::Write;

use thiserror::Error;

/// Errors raised while loading the configuration. These are the only fatal
/// errors; everything that happens during a probe is turned into an outcome.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid probe url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures of a single GET to the probe endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed")]
    Network(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err)
        }
    }
}

/// Flatten an error and its sources into a single line.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Error, Debug)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_report_walks_sources() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(report(&err), "outer: connection refused");
    }

    #[test]
    fn test_report_single_error() {
        let err = TransportError::Other("dns failure".to_string());
        assert_eq!(report(&err), "request failed: dns failure");
    }
}
