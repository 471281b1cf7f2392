//! Result and error types for the harness.

use thiserror::Error;

/// Result type for harness operations
pub type TeclaResult<T> = Result<T, TeclaError>;

/// Errors that can occur while driving a run.
///
/// A verifier condition failing is not an error: it is a recorded
/// per-case outcome followed by environment recovery. Everything here
/// terminates the run when it reaches the binary.
#[derive(Debug, Error)]
pub enum TeclaError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error (open, close, listener attach)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Keyboard synthesis error
    #[error("Input injection failed: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// Active-window query error
    #[error("Active window query failed: {message}")]
    Focus {
        /// Error message
        message: String,
    },

    /// The recovery handshake never saw a page signal. This is the one
    /// unrecoverable failure: the run aborts.
    #[error("Was not able to reach the browser window after {attempts} tab presses")]
    HandshakeFailed {
        /// Tab presses injected before giving up
        attempts: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TeclaError {
    /// Create a browser launch error
    #[must_use]
    pub fn browser_launch(message: impl Into<String>) -> Self {
        Self::BrowserLaunch {
            message: message.into(),
        }
    }

    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a navigation error
    #[must_use]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an input injection error
    #[must_use]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a focus oracle error
    #[must_use]
    pub fn focus(message: impl Into<String>) -> Self {
        Self::Focus {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_launch_error() {
        let err = TeclaError::browser_launch("no executable");
        assert!(err.to_string().contains("launch browser"));
        assert!(err.to_string().contains("no executable"));
    }

    #[test]
    fn test_navigation_error_carries_url() {
        let err = TeclaError::navigation("http://localhost:3000/", "net::ERR_REFUSED");
        assert!(err.to_string().contains("http://localhost:3000/"));
        assert!(err.to_string().contains("net::ERR_REFUSED"));
    }

    #[test]
    fn test_handshake_error_mentions_attempts() {
        let err = TeclaError::HandshakeFailed { attempts: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port 3000 taken");
        let err: TeclaError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
