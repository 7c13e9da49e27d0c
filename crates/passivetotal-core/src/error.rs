use thiserror::Error;

/// Result type alias for PassiveTotal operations
pub type Result<T> = std::result::Result<T, PassiveTotalError>;

/// Errors that can occur when using the PassiveTotal API
#[derive(Error, Debug)]
pub enum PassiveTotalError {
    /// Authentication failed - invalid username or API key
    #[error("authentication failed: invalid username or API key")]
    Unauthorized,

    /// The account has used up its query quota
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        /// Message returned by the API
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query value was rejected before sending
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid IP address format
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// Invalid hostname format
    #[error("invalid hostname: {0}")]
    InvalidHostname(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// An analyzer object outlived the analyzer that created it
    #[error("analyzer was dropped while its objects are still in use")]
    AnalyzerDropped,
}

impl PassiveTotalError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::QuotaExceeded { .. } => Some(402),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
