pub mod commands;
pub mod error;
pub mod events;
pub mod types;

pub use commands::{ApiRequest, NetworkCommand, RequestKind};
pub use error::ApiError;
pub use events::{ApiReply, NetworkEvent};
pub use types::{Author, AuthResponse, ChatMessage, Credentials, HistoryEntry, Profile, ProfileEnvelope};
