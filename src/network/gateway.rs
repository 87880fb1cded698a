use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::common::{ApiError, NetworkEvent};
use crate::storage::SessionStore;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const PROFILE_GET_PATH: &str = "/api/profile/get";
pub const PROFILE_SAVE_PATH: &str = "/api/profile/save";
pub const AI_MESSAGE_PATH: &str = "/api/ai/message";
pub const AI_HISTORY_PATH: &str = "/api/ai/history";

/// Auth endpoints that never carry the stored token.
pub const PUBLIC_ENDPOINTS: [&str; 3] = [LOGIN_PATH, SIGNUP_PATH, REFRESH_PATH];

pub fn is_public(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    PUBLIC_ENDPOINTS.contains(&path)
}

/// Single exit point for backend calls: attaches the bearer token and
/// drops the session when the server rejects it.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn HttpTransport>,
    session: SessionStore,
    event_sender: mpsc::Sender<NetworkEvent>,
}

impl Gateway {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: SessionStore,
        event_sender: mpsc::Sender<NetworkEvent>,
    ) -> Self {
        Self {
            transport,
            session,
            event_sender,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn get(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpResponse, ApiError> {
        let body = serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.send(Method::Post, path, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let public = is_public(path);
        let bearer = if public { None } else { self.session.token() };

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                path: path.to_string(),
                bearer,
                body,
            })
            .await?;

        if response.is_success() {
            return Ok(response);
        }

        let error = ApiError::Status {
            status: response.status,
            body: response.body,
        };
        if !public && error.is_unauthorized() {
            self.expire_session(path, response.status).await;
        }
        Err(error)
    }

    async fn expire_session(&self, path: &str, status: u16) {
        log::warn!("{path} rejected the session ({status}); logging out");
        if let Err(err) = self.session.clear() {
            log::error!("Failed to clear session after {status}: {err}");
        }
        if let Err(err) = self.event_sender.send(NetworkEvent::SessionExpired).await {
            log::warn!("Failed to notify UI about expired session: {err}");
        }
    }
}
