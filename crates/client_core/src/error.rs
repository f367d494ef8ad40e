use shared::{domain::MovieId, error::ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid catalog api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} answered with HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("movie {id} not found")]
    NotFound {
        id: MovieId,
        message: Option<String>,
    },
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl ApiClientError {
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: MovieId) -> Self {
        Self::NotFound { id, message: None }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidBaseUrl { .. }
            | Self::Transport { .. }
            | Self::Status { .. }
            | Self::Decode { .. } => ErrorKind::Transport,
        }
    }

    /// Message from the server's error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } | Self::NotFound { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unknown_ids_count_as_not_found() {
        assert_eq!(
            ApiClientError::not_found(MovieId::from("9")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ApiClientError::transport("/movies", "connection refused").kind(),
            ErrorKind::Transport
        );
        let status = ApiClientError::Status {
            endpoint: "/movies/random".to_string(),
            status: 404,
            message: Some("catalog is empty".to_string()),
        };
        assert_eq!(status.kind(), ErrorKind::Transport);
        assert_eq!(status.server_message(), Some("catalog is empty"));
    }
}
