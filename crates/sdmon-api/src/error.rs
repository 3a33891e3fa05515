use thiserror::Error;

use crate::auth::AuthOutcome;

/// Top-level error type for the `sdmon-api` crate.
///
/// Every failure mode the request pipeline can hit is represented here as a
/// returnable value -- nothing in this crate panics on controller misbehavior.
/// Aggregation layers check for these and degrade; a dispatch boundary can
/// render any of them as text.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// No session was held and the lazy login attempt failed. The GET was
    /// never issued.
    #[error("Authentication required. Please authenticate first.")]
    AuthenticationRequired { outcome: AuthOutcome },

    /// The session expired mid-request and the re-login attempt failed.
    /// The original session token is left untouched.
    #[error("Re-authentication failed")]
    Reauthentication { outcome: AuthOutcome },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Envelope ────────────────────────────────────────────────────
    /// The response body was not JSON, or the `{data: ...}` envelope was
    /// missing its `data` key. Carries the raw body for debugging.
    #[error("{message}")]
    Envelope {
        message: String,
        body: String,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The unwrapped `data` payload did not match the expected shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came out of the authentication path
    /// (either the lazy login or the expired-session re-login).
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired { .. } | Self::Reauthentication { .. }
        )
    }

    /// The login outcome attached to an authentication error, if any.
    pub fn auth_outcome(&self) -> Option<&AuthOutcome> {
        match self {
            Self::AuthenticationRequired { outcome } | Self::Reauthentication { outcome } => {
                Some(outcome)
            }
            _ => None,
        }
    }
}
