// Controller HTTP client and authenticated-request pipeline.
//
// Wraps `reqwest::Client` with the controller's cookie-session handling and
// `{data: ...}` envelope unwrapping. Endpoint groups (devices, stats, bfd,
// tunnels) are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.

use std::sync::{Arc, RwLock};

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthOutcome;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Name of the session cookie the login endpoint sets.
pub(crate) const SESSION_COOKIE: &str = "JSESSIONID";

/// Client for the SD-WAN controller's monitoring API.
///
/// Holds the credentials and the current session token. Requests go through
/// [`fetch`](Client::fetch), which lazily authenticates, detects expired
/// sessions (401 or a redirect to a login page), re-authenticates at most
/// once per call, and strips the `{data: ...}` envelope before the caller
/// sees the payload.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    /// Session token mirrored out of the cookie jar. Presence means the last
    /// login succeeded; it is never cleared by a failed re-login.
    session_id: RwLock<Option<String>>,
    /// Serializes login attempts so concurrent expiry signals coalesce into
    /// a single re-authentication.
    auth_lock: tokio::sync::Mutex<()>,
}

impl Client {
    /// Create a new client. A cookie jar is always attached -- session auth
    /// requires one.
    pub fn new(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.into(),
            password,
            session_id: RwLock::new(None),
            auth_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    // ── Session token ────────────────────────────────────────────────

    /// The full session token, if a login has succeeded.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .expect("session lock poisoned")
            .clone()
    }

    pub(crate) fn store_session_id(&self, token: String) {
        *self.session_id.write().expect("session lock poisoned") = Some(token);
    }

    // ── Authenticated-request pipeline ───────────────────────────────

    /// GET a controller endpoint and unwrap the `{data: ...}` envelope.
    ///
    /// With no session held, logs in first; if that fails the GET is never
    /// issued. A 401 response or a final URL pointing at a login page is
    /// treated as an expired session: one re-login, one retried GET, never
    /// more.
    pub async fn fetch(&self, endpoint: &str) -> Result<Value, Error> {
        if self.session_id().is_none() {
            let outcome = self.refresh_session(None).await;
            if !outcome.is_success() {
                return Err(Error::AuthenticationRequired { outcome });
            }
        }

        let url = self.base_url.join(endpoint)?;
        debug!("GET {}", url);

        let observed = self.session_id();
        let mut resp = self.http.get(url.clone()).send().await?;

        if session_expired(&resp) {
            warn!("session expired, re-authenticating");
            let outcome = self.refresh_session(observed).await;
            if !outcome.is_success() {
                return Err(Error::Reauthentication { outcome });
            }
            resp = self.http.get(url).send().await?;
        }

        let status = resp.status().as_u16();
        let body = resp.text().await?;

        let Ok(parsed) = serde_json::from_str::<Value>(&body) else {
            return Err(Error::Envelope {
                message: "Response is not in JSON format".into(),
                body,
                status,
            });
        };

        match parsed.get("data") {
            Some(data) => Ok(data.clone()),
            None => Err(Error::Envelope {
                message: "Key 'data' not found in response".into(),
                body,
                status,
            }),
        }
    }

    /// Fetch an endpoint and deserialize the unwrapped `data` payload.
    pub(crate) async fn fetch_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, Error> {
        let data = self.fetch(endpoint).await?;
        serde_json::from_value(data.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: data.to_string(),
        })
    }

    pub(crate) async fn auth_lock_for_login(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.auth_lock.lock().await
    }

    /// Re-login with the configured credentials, coalescing concurrent
    /// attempts: whoever holds the lock logs in, everyone else waits and
    /// reuses the refreshed session.
    ///
    /// `observed` is the token the caller saw before deciding to refresh; if
    /// the stored token already differs, another task has re-authenticated
    /// and no new login is issued.
    pub(crate) async fn refresh_session(&self, observed: Option<String>) -> AuthOutcome {
        let _guard = self.auth_lock.lock().await;

        if let Some(current) = self.session_id() {
            if observed.as_deref() != Some(current.as_str()) {
                debug!("session already refreshed by a concurrent caller");
                return AuthOutcome::already_refreshed(&current);
            }
        }

        self.login_locked(None, None).await
    }
}

/// Expired-session signal: a 401, or the (post-redirect) final URL landing on
/// a login page.
fn session_expired(resp: &reqwest::Response) -> bool {
    resp.status() == StatusCode::UNAUTHORIZED || resp.url().as_str().to_lowercase().contains("login")
}
