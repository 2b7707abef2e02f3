//! TCAdmin client errors

use thiserror::Error;

/// Errors that can occur when talking to a TCAdmin server
#[derive(Debug, Error)]
pub enum TcAdminError {
    /// The connection string is missing its host or password
    #[error("TCAdmin: Connect string is not set or is incomplete: {0}")]
    Configuration(String),

    /// The HTTP transport could not be initialised
    #[error("TCAdmin: HTTP transport is unavailable: {0}")]
    Environment(String),

    /// The HTTP call could not be completed (connect failure, timeout, non-2xx status)
    #[error("TCAdmin: Unable to complete request. Error: {0}")]
    Transport(String),

    /// The response body is not a usable XML document
    #[error("TCAdmin: Unable to parse return as XML: {0}")]
    ResponseFormat(String),

    /// The remote system reported a non-zero `errorcode`
    #[error("TCAdmin: remote error {code}: {message}")]
    RemoteOperation {
        /// Normalized (non-negative) error code
        code: i64,
        /// `errortext` as sent by the server
        message: String,
    },

    /// The scripted browser used for GUI login failed
    #[error("TCAdmin: GUI login failed: {0}")]
    Login(String),
}

impl TcAdminError {
    /// Numeric code for this error.
    ///
    /// Local failures use the client's fixed codes (1 missing transport,
    /// 2 bad connect string, 3 call failed, 4 invalid response). Remote
    /// failures return the code reported by the server.
    pub fn code(&self) -> i64 {
        match self {
            Self::Environment(_) => 1,
            Self::Configuration(_) => 2,
            Self::Transport(_) | Self::Login(_) => 3,
            Self::ResponseFormat(_) => 4,
            Self::RemoteOperation { code, .. } => *code,
        }
    }

    /// True when the server answered and reported an error, as opposed to a
    /// local or transport failure.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteOperation { .. })
    }
}

impl From<reqwest::Error> for TcAdminError {
    fn from(e: reqwest::Error) -> Self {
        TcAdminError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_use_fixed_codes() {
        assert_eq!(TcAdminError::Environment("x".into()).code(), 1);
        assert_eq!(TcAdminError::Configuration("x".into()).code(), 2);
        assert_eq!(TcAdminError::Transport("x".into()).code(), 3);
        assert_eq!(TcAdminError::ResponseFormat("x".into()).code(), 4);
    }

    #[test]
    fn remote_error_carries_server_code_and_text() {
        let err = TcAdminError::RemoteOperation {
            code: 5,
            message: "Billing ID not found".to_string(),
        };
        assert_eq!(err.code(), 5);
        assert!(err.is_remote());
        assert_eq!(err.to_string(), "TCAdmin: remote error 5: Billing ID not found");
    }
}
