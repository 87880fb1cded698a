use uuid::Uuid;

use super::types::{Credentials, Profile};

/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run `request` on behalf of the screen activation `origin`.
    Request { origin: Uuid, request: ApiRequest },
    /// Abort every in-flight request started by the activation.
    Cancel(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Login(Credentials),
    Register(Credentials),
    RefreshSession,
    LoadProfile,
    SaveProfile(Profile),
    LoadHistory,
    SendMessage(String),
}

impl ApiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ApiRequest::Login(_) => RequestKind::Login,
            ApiRequest::Register(_) => RequestKind::Register,
            ApiRequest::RefreshSession => RequestKind::RefreshSession,
            ApiRequest::LoadProfile => RequestKind::LoadProfile,
            ApiRequest::SaveProfile(_) => RequestKind::SaveProfile,
            ApiRequest::LoadHistory => RequestKind::LoadHistory,
            ApiRequest::SendMessage(_) => RequestKind::SendMessage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Login,
    Register,
    RefreshSession,
    LoadProfile,
    SaveProfile,
    LoadHistory,
    SendMessage,
}
