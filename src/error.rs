use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `conduit`.
///
/// Each subsystem defines its own error variant. The binary converts all of
/// them into a single operator-facing failure at the command boundary.
#[derive(Debug, Error)]
pub enum ConduitError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend client ──────────────────────────────────────────────────
    #[error(transparent)]
    Client(#[from] ClientError),

    // ── Add-integration flow ────────────────────────────────────────────
    #[error(transparent)]
    Flow(#[from] FlowError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Backend client errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

// ─── Flow errors ────────────────────────────────────────────────────────────

/// Failures of the add-integration flow that are reported to the operator.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Invalid value for `auth_mode`, select from `{}`", choices.join(", "))]
    InvalidAuthMode { mode: String, choices: Vec<String> },

    #[error("{0} is required")]
    RequiredField(String),

    #[error("No integration found with ID: `{0}`")]
    IntegrationNotFound(String),

    #[error("{0} does not require authentication")]
    NoAuthRequired(String),

    #[error("not logged in: set `api_key` in {0} or export CONDUIT_API_KEY")]
    LoginRequired(String),

    #[error("connection for {app} ended in status {status}")]
    ConnectionFailed { app: String, status: String },

    #[error("timed out after {0}s waiting for the connection to become active")]
    WaitTimedOut(u64),

    #[error("backend returned no redirect URL for {0}")]
    MissingRedirect(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<dialoguer::Error> for FlowError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ConduitError>;

/// Result type of backend calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_auth_mode_lists_choices() {
        let err = FlowError::InvalidAuthMode {
            mode: "magic".into(),
            choices: vec!["OAUTH2".into(), "API_KEY".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("OAUTH2"));
        assert!(msg.contains("API_KEY"));
    }

    #[test]
    fn integration_not_found_names_id() {
        let err = FlowError::IntegrationNotFound("int-42".into());
        assert_eq!(err.to_string(), "No integration found with ID: `int-42`");
    }

    #[test]
    fn required_field_names_field() {
        let err = FlowError::RequiredField("API Key".into());
        assert_eq!(err.to_string(), "API Key is required");
    }

    #[test]
    fn client_error_is_transparent_at_top_level() {
        let err = ConduitError::Client(ClientError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.to_string(), "API error (500): boom");
    }

    #[test]
    fn not_found_only_for_404() {
        assert!(
            ClientError::Api {
                status: 404,
                message: String::new()
            }
            .is_not_found()
        );
        assert!(!ClientError::Transport("refused".into()).is_not_found());
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: ConduitError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }
}
