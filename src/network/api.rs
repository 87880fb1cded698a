use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::common::{ApiError, AuthResponse, Credentials, HistoryEntry, Profile, ProfileEnvelope};

use super::gateway::{
    AI_HISTORY_PATH, AI_MESSAGE_PATH, Gateway, LOGIN_PATH, PROFILE_GET_PATH, PROFILE_SAVE_PATH,
    REFRESH_PATH, SIGNUP_PATH,
};
use super::transport::HttpResponse;

#[derive(Serialize)]
struct SendMessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(serde::Deserialize, Default)]
struct SaveProfileResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Typed wrapper over the tutor backend.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Logs in and stores the returned session. Returns the server message.
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<String>, ApiError> {
        let response = self.gateway.post(LOGIN_PATH, credentials).await?;
        self.store_session(parse_json(&response)?)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Option<String>, ApiError> {
        let response = self.gateway.post(SIGNUP_PATH, credentials).await?;
        self.store_session(parse_json(&response)?)
    }

    /// Swaps in a fresh token. The result is discarded when the session was
    /// cleared or replaced while the call was in flight.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let session = self.gateway.session();
        let Some(refresh_token) = session.refresh_token() else {
            log::debug!("No refresh token stored; skipping session refresh");
            return Ok(());
        };
        let started_with = session.token();
        let body = RefreshBody {
            refresh_token: &refresh_token,
        };
        let response = self.gateway.post(REFRESH_PATH, &body).await?;
        let parsed: AuthResponse = parse_json(&response)?;
        if session.token() != started_with {
            log::info!("Session changed during refresh; discarding refreshed token");
            return Ok(());
        }
        self.store_session(parsed)?;
        Ok(())
    }

    /// `None` means the user has no profile yet.
    pub async fn fetch_profile(&self) -> Result<Option<Profile>, ApiError> {
        let response = self.gateway.get(PROFILE_GET_PATH).await?;
        let envelope: ProfileEnvelope = parse_json(&response)?;
        if !envelope.success {
            log::info!(
                "No profile on server: {}",
                envelope.message.as_deref().unwrap_or("(no message)")
            );
            return Ok(None);
        }
        Ok(envelope.profile)
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<Option<String>, ApiError> {
        let response = self.gateway.post(PROFILE_SAVE_PATH, profile).await?;
        let parsed: SaveProfileResponse = serde_json::from_str(&response.body).unwrap_or_default();
        Ok(parsed.message)
    }

    /// Sends a chat line; the backend answers with plain text.
    pub async fn send_message(&self, message: &str) -> Result<String, ApiError> {
        let response = self
            .gateway
            .post(AI_MESSAGE_PATH, &SendMessageBody { message })
            .await?;
        Ok(response.body)
    }

    /// Raw history entries. A body that is not a JSON array yields nothing.
    pub async fn fetch_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let response = self.gateway.get(AI_HISTORY_PATH).await?;
        let value: serde_json::Value = parse_json(&response)?;
        match value {
            serde_json::Value::Array(items) => Ok(items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item.clone())
                        .unwrap_or(HistoryEntry::Unrecognized(item))
                })
                .collect()),
            other => {
                log::warn!("History response is not an array: {other}");
                Ok(Vec::new())
            }
        }
    }

    fn store_session(&self, response: AuthResponse) -> Result<Option<String>, ApiError> {
        let session = self.gateway.session();
        let token = response
            .session_token()
            .ok_or_else(|| ApiError::Decode("auth response carried no token".into()))?;
        session
            .save_token(token)
            .map_err(|err| ApiError::Decode(format!("failed to store session: {err}")))?;
        if let Some(refresh_token) = response.refresh_token.as_deref() {
            if let Err(err) = session.save_refresh_token(refresh_token) {
                log::warn!("Failed to store refresh token: {err}");
            }
        }
        Ok(response.message)
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
}
