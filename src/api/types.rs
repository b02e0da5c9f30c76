use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest<'a> {
    pub content: &'a str,
}

/// `{"detail": ...}` acknowledgement returned by delete / add-member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl DetailResponse {
    pub fn message(&self) -> Option<String> {
        self.detail.as_ref().map(detail_to_string)
    }
}

/// Render a `detail` payload: strings verbatim, anything else (validation
/// error arrays) as compact JSON.
pub fn detail_to_string(detail: &serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
