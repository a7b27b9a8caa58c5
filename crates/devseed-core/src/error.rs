use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed fixture {}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{context} failed with status {status}: {body}")]
    Http {
        context: String,
        status: u16,
        body: String,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Embedding cache: {0}")]
    Cache(String),
}

impl Error {
    /// Authentication or authorization rejections. Every later request made
    /// with the same credentials would be rejected the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Http { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> Error {
        Error::Http { context: "lookup".into(), status, body: String::new() }
    }

    #[test]
    fn only_auth_rejections_are_fatal() {
        assert!(http(401).is_fatal());
        assert!(http(403).is_fatal());
        assert!(!http(404).is_fatal());
        assert!(!http(500).is_fatal());
        assert!(!Error::Decode("missing id".into()).is_fatal());
    }

    #[test]
    fn fixture_error_leaves_the_yaml_detail_to_its_source() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("a: [").expect_err("bad yaml");
        let detail = source.to_string();
        let err = Error::Fixture { path: "users/bad.yml".into(), source };

        assert_eq!(err.to_string(), "Malformed fixture users/bad.yml");
        let cause = std::error::Error::source(&err).expect("source").to_string();
        assert_eq!(cause, detail);
    }

    #[test]
    fn http_error_message_names_context_and_status() {
        let msg = http(409).to_string();
        assert_eq!(msg, "lookup failed with status 409: ");
    }
}
