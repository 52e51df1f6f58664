//! Error types for the discovery loader
//!
//! The HTTP failure kinds form a closed taxonomy mapped 1:1 from status
//! codes. All public APIs return `Result<T, Error>` where Error is defined
//! here.

use thiserror::Error;

/// The main error type for the discovery loader
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Classified HTTP Errors
    // ============================================================================
    #[error("Bad request (400): {message}")]
    BadRequest { message: String },

    #[error("Unauthorized (401): {message}")]
    Unauthorized { message: String },

    #[error("Forbidden (403): {message}")]
    Forbidden { message: String },

    #[error("Not found (404): {message}")]
    NotFound { message: String },

    #[error("Method not allowed (405): {message}")]
    MethodNotAllowed { message: String },

    #[error("Rate limit reached (429): {message}")]
    RateLimitReached { message: String },

    #[error("Internal server error (500): {message}")]
    InternalServerError { message: String },

    #[error("Service unavailable (503): {message}")]
    ServiceUnavailable { message: String },

    /// Any other non-2xx status, raw code preserved for diagnostics
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required environment variable: {name}")]
    MissingEnvVar { name: String },

    // ============================================================================
    // Collaborator Errors
    // ============================================================================
    #[error("Checkpoint error: {message}")]
    Checkpoint { message: String },

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Classify an HTTP status code into a failure kind.
    ///
    /// Pure mapping; when the server supplied no message the canonical
    /// reason phrase is used instead. Unmapped codes fall into the
    /// catch-all with the raw code preserved.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = default_reason(status).to_string();
        }
        match status {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            405 => Self::MethodNotAllowed { message },
            429 => Self::RateLimitReached { message },
            500 => Self::InternalServerError { message },
            503 => Self::ServiceUnavailable { message },
            _ => Self::HttpStatus { status, message },
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a checkpoint error
    pub fn checkpoint(message: impl Into<String>) -> Self {
        Self::Checkpoint {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// The HTTP status code this error carries, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::MethodNotAllowed { .. } => Some(405),
            Self::RateLimitReached { .. } => Some(429),
            Self::InternalServerError { .. } => Some(500),
            Self::ServiceUnavailable { .. } => Some(503),
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the sender may retry after this error.
    ///
    /// Bad credentials will not self-heal, so Unauthorized fails fast.
    /// Every other HTTP or transport failure is retried up to the bound.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unauthorized { .. } => false,
            Self::BadRequest { .. }
            | Self::Forbidden { .. }
            | Self::NotFound { .. }
            | Self::MethodNotAllowed { .. }
            | Self::RateLimitReached { .. }
            | Self::InternalServerError { .. }
            | Self::ServiceUnavailable { .. }
            | Self::HttpStatus { .. }
            | Self::Transport(_) => true,
            _ => false,
        }
    }

    /// Whether this error must terminate the whole run rather than
    /// the current page fetch
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Canonical reason phrase for a status code
fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        429 => "Rate Limit Reached",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "HTTP Error",
    }
}

/// Result type alias for the discovery loader
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, "Bad request (400)" ; "bad request")]
    #[test_case(401, "Unauthorized (401)" ; "unauthorized")]
    #[test_case(403, "Forbidden (403)" ; "forbidden")]
    #[test_case(404, "Not found (404)" ; "not found")]
    #[test_case(405, "Method not allowed (405)" ; "method not allowed")]
    #[test_case(429, "Rate limit reached (429)" ; "rate limited")]
    #[test_case(500, "Internal server error (500)" ; "internal server error")]
    #[test_case(503, "Service unavailable (503)" ; "service unavailable")]
    fn test_from_status_mapping(status: u16, prefix: &str) {
        let err = Error::from_status(status, "boom");
        assert!(err.to_string().starts_with(prefix));
        assert_eq!(err.status(), Some(status));
    }

    #[test]
    fn test_from_status_unmapped_preserves_code() {
        let err = Error::from_status(418, "teapot");
        assert_eq!(err.status(), Some(418));
        assert_eq!(err.to_string(), "HTTP 418: teapot");

        let err = Error::from_status(502, "");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), "HTTP 502: HTTP Error");
    }

    #[test]
    fn test_from_status_default_message() {
        let err = Error::from_status(503, "");
        assert_eq!(
            err.to_string(),
            "Service unavailable (503): Service Unavailable"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::from_status(429, "").is_retryable());
        assert!(Error::from_status(500, "").is_retryable());
        assert!(Error::from_status(503, "").is_retryable());
        assert!(Error::from_status(400, "").is_retryable());
        assert!(Error::from_status(418, "").is_retryable());

        assert!(!Error::from_status(401, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::checkpoint("test").is_retryable());
    }

    #[test]
    fn test_is_fatal() {
        assert!(Error::from_status(401, "").is_fatal());
        assert!(!Error::from_status(503, "").is_fatal());
        assert!(!Error::from_status(429, "").is_fatal());
    }
}
