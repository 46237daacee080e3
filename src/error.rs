use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced while updating the stats block.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration, detected before any request is made.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The request never produced a response.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("analytics API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The response body is not JSON or an entry is malformed.
    #[error("failed to decode analytics response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A nested field the report needs is absent.
    #[error("unexpected response shape: missing `{field}`")]
    UnexpectedShape { field: String },
    /// GraphQL errors returned without any data.
    #[error("analytics API reported errors: {}", messages.join("; "))]
    Api { messages: Vec<String> },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document has no start/end marker pair.
    #[error("stats markers not found in {}", path.display())]
    RegionNotFound { path: PathBuf },
}

impl Error {
    pub(crate) fn shape(field: impl Into<String>) -> Self {
        Error::UnexpectedShape {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message() {
        let err = Error::Config("zone id is empty".into());
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("zone id is empty"));
    }

    #[test]
    fn shape_error_names_field() {
        let err = Error::shape("data.viewer.zones[0]");
        assert_eq!(
            err.to_string(),
            "unexpected response shape: missing `data.viewer.zones[0]`"
        );
    }

    #[test]
    fn api_error_joins_messages() {
        let err = Error::Api {
            messages: vec!["authentication error".into(), "zone not found".into()],
        };
        assert!(err
            .to_string()
            .ends_with("authentication error; zone not found"));
    }

    #[test]
    fn status_error_includes_body() {
        let err = Error::Status {
            status: StatusCode::FORBIDDEN,
            body: "denied".into(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn io_errors_mention_path() {
        let err = Error::Read {
            path: PathBuf::from("docs/README.md"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("docs/README.md"));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
