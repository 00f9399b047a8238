use reqwest::StatusCode;
use thiserror::Error;

/// Longest response body excerpt carried by [`ClientError::Status`].
const BODY_EXCERPT_CHARS: usize = 100;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client")]
    Build(#[source] reqwest::Error),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned {status}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// HTTP status of a rejected request, `None` when no response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn rejected(path: &str, status: StatusCode, body: &str) -> Self {
        ClientError::Status {
            path: path.to_string(),
            status,
            body: excerpt(body),
        }
    }
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(150);
        let err = ClientError::rejected("/api/employees", StatusCode::BAD_REQUEST, &body);
        let ClientError::Status { body, .. } = &err else {
            panic!("expected status error");
        };
        assert_eq!(body.chars().count(), 100);
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn decode_error_names_the_offending_field() {
        let source = serde_json::from_str::<entity::Employee>(r#"{"id": "not-a-uuid"}"#)
            .unwrap_err();
        let err = ClientError::Decode {
            path: "/api/employees".into(),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("unexpected payload from /api/employees: "));
        assert!(message.contains("line 1 column"), "{message}");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn status_error_names_path_and_code() {
        let err = ClientError::rejected(
            "/api/departments",
            StatusCode::CONFLICT,
            "duplicate name\n",
        );
        assert_eq!(
            err.to_string(),
            "/api/departments returned 409 Conflict: duplicate name"
        );
    }
}
