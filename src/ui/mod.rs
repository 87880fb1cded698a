pub mod app;
pub mod auth_form;
pub mod chat_session;
pub mod components;
pub mod notice;
pub mod profile_form;
pub mod router;
pub mod scroll;
pub mod state;

pub use app::TutorApp;
pub use state::AppState;
