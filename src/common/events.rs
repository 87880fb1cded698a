use uuid::Uuid;

use super::commands::RequestKind;
use super::error::ApiError;
use super::types::{HistoryEntry, Profile};

/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    Completed {
        origin: Uuid,
        kind: RequestKind,
        result: Result<ApiReply, ApiError>,
    },
    /// A protected call came back 401/403 and the stored session was dropped.
    SessionExpired,
}

/// Successful payload of an [`ApiRequest`](super::ApiRequest).
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Authenticated { message: Option<String> },
    SessionRefreshed,
    Profile(Option<Profile>),
    ProfileSaved { message: Option<String> },
    History(Vec<HistoryEntry>),
    Reply(String),
}
