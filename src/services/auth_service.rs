use std::sync::Arc;

use serde_json::Value as JsonValue;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::auth_dto::{session_from_login_response, LoginPayload, RegisterPayload};
use crate::error::Result;
use crate::models::user::User;
use crate::session::{AuthSession, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let body: JsonValue = self.api.post_json("/auth/login", &payload).await?;
        let session = session_from_login_response(body, &payload.email);
        self.session.set(session.clone())?;
        tracing::info!("Logged in as {}", session.user.display_name());
        Ok(session)
    }

    /// Registers a new account. Does not log in; the user authenticates
    /// explicitly afterwards.
    pub async fn register(&self, name: Option<&str>, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        let username = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email));
        let payload = RegisterPayload {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        self.api.post_json("/auth/register", &payload).await
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Session cleared");
    }

    pub fn current_session(&self) -> Option<AuthSession> {
        self.session.current()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
