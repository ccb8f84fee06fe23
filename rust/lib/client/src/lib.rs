//! HTTP backend for the campus console.
//!
//! [`HttpBackend`] implements the console's [`MenuSource`] and [`RoleSink`]
//! over the admin REST API. Every call takes the explicit [`Session`] and
//! sends its bearer token; nothing is cached between calls.
//!
//! ```ignore
//! let backend = Arc::new(HttpBackend::from_config(&config)?);
//! let ctx = ConsoleContext::new(backend.clone(), backend);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use campus_console::source::{MenuSource, RoleRecord, RoleSavePayload, RoleSink};
use campus_console::ConsoleError;
use campus_core::{ConsoleConfig, Session};
use campus_menu::{MenuNode, PermissionRecord};
use reqwest::header::ACCEPT_LANGUAGE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl From<ApiError> for ConsoleError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Server { status: 401, message } => ConsoleError::SessionRejected(message),
            ApiError::Server { status: 404, message } => ConsoleError::NotFound(message),
            ApiError::Server { status, message } if status >= 500 => {
                ConsoleError::Unavailable(format!("HTTP {}: {}", status, message))
            }
            ApiError::Server { status, message } => ConsoleError::Backend { status, message },
            ApiError::Network(e) => ConsoleError::Unavailable(e.to_string()),
            ApiError::Auth(_) => ConsoleError::InvalidCredentials,
            ApiError::Decode(msg) => ConsoleError::Malformed(msg),
        }
    }
}

// ── Wire shapes ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    user: LoginUser,
}

#[derive(Deserialize)]
struct LoginUser {
    id: i64,
    username: String,
}

#[derive(Deserialize)]
struct SavedRole {
    id: i64,
}

// ── HttpBackend ─────────────────────────────────────────────────────

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    locale: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration, locale: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale: locale.into(),
        })
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ApiError> {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.request_timeout_secs),
            config.locale.clone(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, builder: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(session.token())
            .header(ACCEPT_LANGUAGE, &self.locale)
    }

    /// Map non-2xx to `ApiError::Server` and decode the body.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message: body });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    async fn get<R: DeserializeOwned>(&self, session: &Session, path: &str) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self.authed(self.http.get(&url), session).send().await?;
        Self::parse(resp).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.url("auth/login");
        let resp = self
            .http
            .post(&url)
            .header(ACCEPT_LANGUAGE, &self.locale)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!("login failed ({}): {}", status.as_u16(), body)));
        }
        let lr: LoginResponse = Self::parse(resp).await?;
        Ok(Session::new(lr.user.id, lr.user.username, lr.access_token))
    }

    pub async fn menus(&self, session: &Session) -> Result<Vec<MenuNode>, ApiError> {
        self.get(session, "menus/tree").await
    }

    pub async fn permissions(&self, session: &Session) -> Result<Vec<PermissionRecord>, ApiError> {
        self.get(session, "permissions/me").await
    }

    pub async fn role(&self, session: &Session, role_id: i64) -> Result<RoleRecord, ApiError> {
        self.get(session, &format!("roles/{}", role_id)).await
    }

    /// `POST /roles` for a new role, `PUT /roles/{id}` for an existing one.
    pub async fn save_role(
        &self,
        session: &Session,
        role_id: Option<i64>,
        payload: &RoleSavePayload,
    ) -> Result<i64, ApiError> {
        let builder = match role_id {
            Some(id) => self.http.put(self.url(&format!("roles/{}", id))),
            None => self.http.post(self.url("roles")),
        };
        let resp = self.authed(builder, session).json(payload).send().await?;
        let saved: SavedRole = Self::parse(resp).await?;
        Ok(saved.id)
    }
}

#[async_trait]
impl MenuSource for HttpBackend {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ConsoleError> {
        Ok(HttpBackend::login(self, username, password).await?)
    }

    async fn menus(&self, session: &Session) -> Result<Vec<MenuNode>, ConsoleError> {
        Ok(HttpBackend::menus(self, session).await?)
    }

    async fn permissions(&self, session: &Session) -> Result<Vec<PermissionRecord>, ConsoleError> {
        Ok(HttpBackend::permissions(self, session).await?)
    }

    async fn role(&self, session: &Session, role_id: i64) -> Result<RoleRecord, ConsoleError> {
        Ok(HttpBackend::role(self, session, role_id).await?)
    }
}

#[async_trait]
impl RoleSink for HttpBackend {
    async fn save_role(
        &self,
        session: &Session,
        role_id: Option<i64>,
        payload: &RoleSavePayload,
    ) -> Result<i64, ConsoleError> {
        Ok(HttpBackend::save_role(self, session, role_id, payload).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(2), "en").unwrap()
    }

    #[test]
    fn urls_join_cleanly() {
        let b = backend("http://localhost:8080/api/");
        assert_eq!(b.url("menus/tree"), "http://localhost:8080/api/menus/tree");
        assert_eq!(b.url("/roles/7"), "http://localhost:8080/api/roles/7");
    }

    #[test]
    fn api_errors_map_to_console_errors() {
        let server = |status| ApiError::Server { status, message: "body".into() };
        assert_eq!(
            ConsoleError::from(server(401)),
            ConsoleError::SessionRejected("body".into())
        );
        assert_eq!(ConsoleError::from(server(404)), ConsoleError::NotFound("body".into()));
        assert!(matches!(ConsoleError::from(server(502)), ConsoleError::Unavailable(_)));
        assert_eq!(
            ConsoleError::from(server(409)),
            ConsoleError::Backend { status: 409, message: "body".into() }
        );
        assert_eq!(
            ConsoleError::from(ApiError::Auth("nope".into())),
            ConsoleError::InvalidCredentials
        );
        assert!(matches!(
            ConsoleError::from(ApiError::Decode("eof".into())),
            ConsoleError::Malformed(_)
        ));
    }

    #[test]
    fn wire_shapes_decode() {
        let lr: LoginResponse = serde_json::from_str(
            r#"{"access_token":"jwt","expires_in":3600,"user":{"id":9,"username":"ops"}}"#,
        )
        .unwrap();
        assert_eq!(lr.access_token, "jwt");
        assert_eq!(lr.user.id, 9);

        let menus: Vec<MenuNode> = serde_json::from_str(
            r#"[{"id":1,"parentId":0,"name":"Academics","children":[
                {"id":2,"parentId":1,"name":"Classes","code":"class:list","path":"/classes"}]}]"#,
        )
        .unwrap();
        assert_eq!(menus[0].children[0].code.as_deref(), Some("class:list"));

        let role: RoleRecord = serde_json::from_str(
            r#"{"id":7,"name":"Teacher","menuIds":[2],"dataPermissionIds":[101]}"#,
        )
        .unwrap();
        assert_eq!(role.description, "");
        assert_eq!(role.menu_ids, vec![2]);
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        // Port 1 on loopback refuses connections.
        let b = backend("http://127.0.0.1:1");
        let session = Session::new(1, "admin", "t");
        let err = MenuSource::menus(&b, &session).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Unavailable(_)));
    }
}
