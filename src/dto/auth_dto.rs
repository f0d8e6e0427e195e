use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::user::User;
use crate::session::AuthSession;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Builds a session out of whatever the login endpoint returned.
///
/// Historically seen token fields, tried in order: `token`, `accessToken`,
/// `jwt`, `tokenValue`; as a last resort the whole body stands in for the
/// token. The user object falls back to the login email.
pub fn session_from_login_response(body: JsonValue, login_email: &str) -> AuthSession {
    let token = ["token", "accessToken", "jwt", "tokenValue"]
        .iter()
        .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
        .unwrap_or_else(|| match &body {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        });

    let user = body
        .get("user")
        .cloned()
        .and_then(|v| serde_json::from_value::<User>(v).ok())
        .unwrap_or_else(|| {
            let email = body
                .get("email")
                .and_then(|v| v.as_str())
                .unwrap_or(login_email);
            User::from_email(email)
        });

    AuthSession { user, token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_field_fallback_order() {
        let session =
            session_from_login_response(json!({"token": "t1", "jwt": "t3"}), "a@b.com");
        assert_eq!(session.token, "t1");

        let session = session_from_login_response(json!({"accessToken": "t2"}), "a@b.com");
        assert_eq!(session.token, "t2");

        let session = session_from_login_response(json!({"jwt": "t3"}), "a@b.com");
        assert_eq!(session.token, "t3");
    }

    #[test]
    fn whole_body_is_the_last_resort_token() {
        let session = session_from_login_response(json!("bare-token"), "a@b.com");
        assert_eq!(session.token, "bare-token");
    }

    #[test]
    fn user_falls_back_to_the_login_email() {
        let session = session_from_login_response(json!({"token": "t"}), "hr@corp.ru");
        assert_eq!(session.user.email.as_deref(), Some("hr@corp.ru"));

        let session = session_from_login_response(
            json!({"token": "t", "user": {"email": "real@corp.ru", "name": "Ольга"}}),
            "hr@corp.ru",
        );
        assert_eq!(session.user.email.as_deref(), Some("real@corp.ru"));
        assert_eq!(session.user.name.as_deref(), Some("Ольга"));
    }

    #[test]
    fn login_payload_requires_a_real_email() {
        let bad = LoginPayload {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
