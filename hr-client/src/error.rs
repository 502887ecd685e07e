//! Client error types

use crate::config::ConfigError;
use crate::session::StorageError;
use shared::RecordId;
use thiserror::Error;

/// Where an error surfaces in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401, handled centrally by the HTTP client
    Auth,
    /// Form-level, shown inline per field
    Validation,
    /// List load failed; previous page kept
    Fetch,
    /// Create/update/delete failed; optimistic state reverted
    Mutation,
    /// Transport, decoding, configuration or storage
    Other,
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential missing or rejected, with the server's message if it sent one
    #[error("Authentication required")]
    Unauthorized(Option<String>),

    /// Non-success status with the server-provided message
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Form validation failed before submission
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A list page could not be loaded
    #[error("Failed to load {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: Box<ClientError>,
    },

    /// A create/update/delete request failed
    #[error("Failed to {action}: {source}")]
    Mutation {
        action: &'static str,
        #[source]
        source: Box<ClientError>,
    },

    /// The record already has a mutation in flight
    #[error("Record {0} is already being updated")]
    InFlight(RecordId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    pub(crate) fn fetch(resource: &'static str, source: ClientError) -> Self {
        Self::Fetch {
            resource,
            source: Box::new(source),
        }
    }

    pub(crate) fn mutation(action: &'static str, source: ClientError) -> Self {
        Self::Mutation {
            action,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Auth,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Fetch { source, .. } if source.is_unauthorized() => ErrorKind::Auth,
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Mutation { source, .. } if source.is_unauthorized() => ErrorKind::Auth,
            Self::Mutation { .. } | Self::InFlight(_) => ErrorKind::Mutation,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::Fetch { source, .. } | Self::Mutation { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }

    /// The `message` from the server's error body, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            Self::Unauthorized(Some(message)) if !message.is_empty() => Some(message),
            Self::Fetch { source, .. } | Self::Mutation { source, .. } => source.server_message(),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
