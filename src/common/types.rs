use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Người gửi của một tin nhắn chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ia", alias = "assistant")]
    Assistant,
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
        }
    }
}

/// Learning profile, fetched and overwritten as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub english_level: String,
    #[serde(default)]
    pub learning_goal: String,
    #[serde(default, deserialize_with = "nullable_genres")]
    pub music_genres: BTreeSet<String>,
}

fn nullable_genres<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `/api/auth/login` and `/api/auth/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of the auth endpoints. The backend has shipped the access
/// token under three different names over time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, rename = "acessToken")]
    pub misspelled_access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn session_token(&self) -> Option<&str> {
        [
            &self.token,
            &self.access_token,
            &self.misspelled_access_token,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|token| !token.is_empty())
    }
}

/// Envelope returned by `/api/profile/get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Raw entry of `/api/ai/history`, before normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Tagged(String),
    Record { role: String, content: String },
    Unrecognized(serde_json::Value),
}
