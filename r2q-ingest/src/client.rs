//! Account API seam plus the blocking HTTP client that talks to Robinhood.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::types::{Dividend, Instrument, Order, Page};

pub const DEFAULT_BASE_URL: &str = "https://api.robinhood.com";
/// Public client id used by the Robinhood web app for the password grant
pub const DEFAULT_CLIENT_ID: &str = "c82SH0WZOsabOXGP2sxqcj34FxkvfnWRZBKlBjFS";

/// Login credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// One-time code for accounts with multi-factor auth enabled
    pub mfa_code: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            mfa_code: None,
        }
    }

    pub fn with_mfa_code(mut self, code: Option<String>) -> Self {
        self.mfa_code = code;
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("mfa_code", &self.mfa_code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything the exporter needs from a brokerage account.
#[cfg_attr(test, mockall::automock)]
pub trait AccountApi {
    /// Returns `Ok(false)` when the credentials are rejected.
    fn login(&mut self, credentials: &Credentials) -> Result<bool, ApiError>;

    fn order_history(&self) -> Result<Vec<Order>, ApiError>;

    fn dividends(&self) -> Result<Vec<Dividend>, ApiError>;

    /// Look up an instrument URL.
    fn resolve_instrument(&self, instrument: &str) -> Result<Instrument, ApiError>;
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    scope: &'static str,
    client_id: &'a str,
    expires_in: u32,
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mfa_code: Option<&'a str>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    mfa_required: bool,
}

/// Map a token endpoint response to `Some(token)`, `None` for rejected credentials, or an error.
fn login_outcome(status: StatusCode, body: &str) -> Result<Option<String>, ApiError> {
    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let token: TokenResponse = serde_json::from_str(body)?;
    match token.access_token {
        Some(t) => Ok(Some(t)),
        None if token.mfa_required => Err(ApiError::MfaRequired),
        None => Ok(None),
    }
}

/// Blocking Robinhood client holding a bearer token after `login`.
pub struct RobinhoodClient {
    http: Client,
    base_url: String,
    client_id: String,
    token: Option<String>,
}

impl RobinhoodClient {
    pub fn new(base_url: impl Into<String>, client_id: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("robinhood2quicken/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            token: None,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotLoggedIn)?;
        debug!(url, "GET");
        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json()?)
    }

    /// Only the first page is read; anything after it is logged and dropped.
    fn first_page<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let page: Page<T> = self.get_json(&self.endpoint(path))?;
        if let Some(next) = &page.next {
            warn!(path, %next, "more results available; only the first page is exported");
        }
        Ok(page.results)
    }
}

impl AccountApi for RobinhoodClient {
    fn login(&mut self, credentials: &Credentials) -> Result<bool, ApiError> {
        let body = TokenRequest {
            grant_type: "password",
            scope: "internal",
            client_id: &self.client_id,
            expires_in: 86_400,
            username: &credentials.username,
            password: &credentials.password,
            mfa_code: credentials.mfa_code.as_deref(),
        };

        let resp = self
            .http
            .post(self.endpoint("oauth2/token/"))
            .header(ACCEPT, "application/json")
            .form(&body)
            .send()?;

        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        match login_outcome(status, &text)? {
            Some(token) => {
                self.token = Some(token);
                info!(user = %credentials.username, "logged in");
                Ok(true)
            }
            None => {
                debug!(%status, "credentials rejected");
                Ok(false)
            }
        }
    }

    fn order_history(&self) -> Result<Vec<Order>, ApiError> {
        self.first_page("orders/")
    }

    fn dividends(&self) -> Result<Vec<Dividend>, ApiError> {
        self.first_page("dividends/")
    }

    fn resolve_instrument(&self, instrument: &str) -> Result<Instrument, ApiError> {
        self.get_json(instrument)
    }
}
