// Authentication against the controller's web login endpoint.
//
// The controller uses servlet-style form login: POST to /j_security_check
// with j_username/j_password, success signaled by a JSESSIONID cookie landing
// in the jar. An HTTP 2xx without that cookie is a *logical* login failure
// (wrong credentials bounce back to the login page with 200).

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::client::Client;

/// Fixed login path under the controller base URL.
pub(crate) const LOGIN_PATH: &str = "/j_security_check";

/// How much of the session token status/outcome reports expose.
const TOKEN_PREVIEW_LEN: usize = 20;

/// Result of a login attempt. Always a value, never an error -- transport
/// failures are folded into an error-status outcome so callers can embed it
/// in their own results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub status: AuthStatus,
    /// Truncated session token (first 20 characters), present on success.
    pub session_id: Option<String>,
    pub message: String,
    /// Raw response body from the login endpoint, when one was received.
    pub response: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Success,
    Error,
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        self.status == AuthStatus::Success
    }

    fn success(token: &str, body: String) -> Self {
        Self {
            status: AuthStatus::Success,
            session_id: Some(truncate_token(token)),
            message: "Authentication successful".into(),
            response: Some(body),
        }
    }

    fn failure(message: impl Into<String>, body: Option<String>) -> Self {
        Self {
            status: AuthStatus::Error,
            session_id: None,
            message: message.into(),
            response: body,
        }
    }

    /// Outcome handed to callers that lost the re-login race: another task
    /// already refreshed the session.
    pub(crate) fn already_refreshed(token: &str) -> Self {
        Self {
            status: AuthStatus::Success,
            session_id: Some(truncate_token(token)),
            message: "Authentication successful".into(),
            response: None,
        }
    }
}

/// Current session introspection, safe to surface to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    /// Truncated session token, if authenticated.
    pub session_id: Option<String>,
    pub base_url: String,
    pub username: String,
}

fn truncate_token(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_LEN).collect();
    format!("{preview}...")
}

/// Pull the session token out of the login response's `Set-Cookie` headers.
/// Reading the response (rather than the jar) keeps a stale session cookie
/// from masking a rejected re-login.
fn session_cookie_from(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .find_map(|value| {
            let cookie = value.to_str().ok()?;
            let (name, rest) = cookie.split_once('=')?;
            (name.trim() == crate::client::SESSION_COOKIE)
                .then(|| rest.split(';').next().unwrap_or(rest).trim().to_owned())
        })
}

impl Client {
    /// Authenticate with the controller, establishing a cookie session.
    ///
    /// Uses the provided credentials or falls back to the configured
    /// defaults. On success the session token is stored and reused by
    /// [`fetch`](Client::fetch) until the controller signals expiry. On
    /// failure the existing token (if any) is left as it was, so an
    /// already-usable session survives a bad explicit login attempt.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> AuthOutcome {
        // Hold the auth lock so an explicit login and the pipeline's
        // re-authentication never run concurrently.
        let _guard = self.auth_lock_for_login().await;
        self.login_locked(username, password).await
    }

    pub(crate) async fn login_locked(
        &self,
        username: Option<&str>,
        password: Option<&SecretString>,
    ) -> AuthOutcome {
        let user = username.unwrap_or_else(|| self.username());
        let pass = password.unwrap_or_else(|| self.password());

        let url = match self.base_url().join(LOGIN_PATH) {
            Ok(url) => url,
            Err(e) => return AuthOutcome::failure(format!("Authentication exception: {e}"), None),
        };

        debug!("logging in at {}", url);

        let form = [
            ("j_username", user),
            ("j_password", pass.expose_secret()),
        ];

        let resp = match self.http().post(url).form(&form).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "login transport error");
                return AuthOutcome::failure(format!("Authentication exception: {e}"), None);
            }
        };

        let status = resp.status();
        let token = session_cookie_from(resp.headers());
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return AuthOutcome::failure(
                format!("Authentication failed with status code: {}", status.as_u16()),
                Some(body),
            );
        }

        // Transport success is not login success: the controller answers a
        // bad form login with 200 and no session cookie.
        match token {
            Some(token) => {
                self.store_session_id(token.clone());
                info!("authentication successful, session {}", truncate_token(&token));
                AuthOutcome::success(&token, body)
            }
            None => AuthOutcome::failure("authentication failed - no session ID received", Some(body)),
        }
    }

    /// Report whether a session is held and under which identity.
    pub fn session_status(&self) -> SessionStatus {
        let session_id = self.session_id();
        SessionStatus {
            authenticated: session_id.is_some(),
            session_id: session_id.as_deref().map(truncate_token),
            base_url: self.base_url().as_str().trim_end_matches('/').to_owned(),
            username: self.username().to_owned(),
        }
    }
}
