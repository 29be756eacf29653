/// Error types shared across the client
///
/// `ApiError` travels inside UI messages, so it is `Clone` and keeps
/// transport failures as text instead of holding `reqwest::Error`.
use thiserror::Error;

/// Errors reported by the HTTP client adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, body)
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        /// The `error` field of the JSON body, when the server sent one
        message: Option<String>,
    },

    /// The response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A local file could not be read for upload
    #[error("Could not read {path}: {reason}")]
    LocalFile { path: String, reason: String },

    /// A configured or returned URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the server rejected the credentials or the role.
    ///
    /// 422 is what the backend's JWT layer answers for malformed tokens.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Server { status: 401 | 403 | 422, .. })
    }

    /// The message the server attached to the failure, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

/// Errors from the persistent session store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Could not prepare session directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while decoding the claims of an access token
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Not three dot-separated segments
    #[error("Token is not a JWT")]
    Malformed,

    #[error("Token payload is not valid base64url")]
    Encoding,

    #[error("Token payload is not valid JSON: {0}")]
    Payload(String),

    /// Payload decoded but carries no string `role` claim
    #[error("Token has no role claim")]
    MissingRole,
}

/// Errors while generating local upload previews
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Could not decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not write preview: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not save preview: {0}")]
    Encode(#[from] image::ImageError),
}
