use std::fmt;

/// Why the logger could not be reached.
#[derive(Debug)]
pub enum Failure {
    /// The logger answered with a status other than 200 or 401.
    Status(u16),
    /// No complete response arrived within the request timeout.
    Timeout,
    /// Connection, transport or client construction error.
    Http(reqwest::Error),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Status(code) => write!(f, "unexpected HTTP status {code}"),
            Failure::Timeout => write!(f, "request timed out"),
            Failure::Http(e) => write!(f, "HTTP error: {e}"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// The logger rejected the credentials (HTTP 401).
    AuthorizationFailed,
    /// The logger could not be reached or gave an unusable answer.
    ConnectionFailed(Failure),
}

impl Error {
    /// Whether polling again later with the same credentials can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConnectionFailed(_))
    }

    /// Key of the user-facing message shown when device setup fails.
    pub fn setup_error_key(&self) -> &'static str {
        match self {
            Error::AuthorizationFailed => "invalid_auth",
            Error::ConnectionFailed(_) => "cannot_connect",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AuthorizationFailed => write!(f, "authorization failed"),
            Error::ConnectionFailed(reason) => write!(f, "connection failed: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConnectionFailed(Failure::Http(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::ConnectionFailed(Failure::Timeout)
        } else {
            Error::ConnectionFailed(Failure::Http(e))
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
