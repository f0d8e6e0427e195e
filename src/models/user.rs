use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The backend user object is treated as opaque apart from the fields the
/// client displays; anything else round-trips through `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct User {
    pub email: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl User {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}
