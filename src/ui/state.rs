use std::time::Instant;

use uuid::Uuid;

use crate::common::error::MSG_SESSION_EXPIRED;
use crate::common::{ApiError, ApiReply, ApiRequest, NetworkCommand, NetworkEvent, RequestKind};
use crate::storage::{ChatCache, SessionStore};

use super::auth_form::{AuthForm, AuthMode};
use super::chat_session::ChatSession;
use super::notice::Notice;
use super::profile_form::{DEFAULT_SAVED_MESSAGE, ProfileForm};
use super::router::{Router, Screen};
use super::scroll::ScrollTracker;

const DEFAULT_REGISTERED_MESSAGE: &str = "Account created!";

/// Trạng thái cục bộ của UI.
pub struct AppState {
    session: SessionStore,
    cache: ChatCache,
    router: Router,
    /// Tags requests that must outlive screen changes.
    background: Uuid,
    /// History waits for the startup refresh so it goes out with the new token.
    refresh_pending: bool,
    pub login: AuthForm,
    pub register: AuthForm,
    pub profile: ProfileForm,
    pub chat: ChatSession,
    pub scroll: ScrollTracker,
    pub notice: Option<Notice>,
    outbox: Vec<NetworkCommand>,
}

impl AppState {
    pub fn new(session: SessionStore, cache: ChatCache, scroll_threshold: f32) -> Self {
        Self {
            session,
            cache,
            router: Router::new(),
            background: Uuid::new_v4(),
            refresh_pending: false,
            login: AuthForm::new(AuthMode::Login),
            register: AuthForm::new(AuthMode::Register),
            profile: ProfileForm::default(),
            chat: ChatSession::default(),
            scroll: ScrollTracker::new(scroll_threshold),
            notice: None,
            outbox: Vec::new(),
        }
    }

    /// Returning users land in the chat; everyone else on the login screen.
    pub fn start(&mut self) {
        if self.session.is_logged_in() {
            self.refresh_pending = true;
            self.outbox.push(NetworkCommand::Request {
                origin: self.background,
                request: ApiRequest::RefreshSession,
            });
            self.navigate(Screen::Chat);
        } else {
            self.navigate(Screen::Login);
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.current()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn take_commands(&mut self) -> Vec<NetworkCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn navigate(&mut self, target: Screen) {
        let screen = Router::resolve(target, self.session.is_logged_in());
        let torn_down = self.router.enter(screen);
        self.outbox.push(NetworkCommand::Cancel(torn_down));
        self.notice = None;

        match screen {
            Screen::Login => self.login.is_submitting = false,
            Screen::Register => self.register.is_submitting = false,
            Screen::ProfileSetup => {
                self.profile.reset();
                self.profile.is_loading = true;
                self.dispatch(ApiRequest::LoadProfile);
            }
            Screen::Chat => {
                self.chat.activate(&self.cache);
                if self.refresh_pending {
                    log::debug!("Deferring history until the session refresh completes");
                } else {
                    self.dispatch(ApiRequest::LoadHistory);
                }
            }
        }
    }

    /// Drops background work tied to the session that just ended.
    fn end_session(&mut self) {
        self.outbox.push(NetworkCommand::Cancel(self.background));
        self.background = Uuid::new_v4();
        self.refresh_pending = false;
    }

    fn dispatch(&mut self, request: ApiRequest) {
        self.outbox.push(NetworkCommand::Request {
            origin: self.router.activation(),
            request,
        });
    }

    pub fn submit_login(&mut self) {
        if let Some(credentials) = self.login.begin_submit() {
            self.dispatch(ApiRequest::Login(credentials));
        }
    }

    pub fn submit_register(&mut self) {
        if let Some(credentials) = self.register.begin_submit() {
            self.dispatch(ApiRequest::Register(credentials));
        }
    }

    pub fn save_profile(&mut self, now: Instant) {
        self.notice = None;
        match self.profile.submission() {
            Ok(profile) => {
                self.profile.is_loading = true;
                self.dispatch(ApiRequest::SaveProfile(profile));
            }
            Err(err) => self.notice = Some(Notice::error(err.to_string(), now)),
        }
    }

    pub fn send_chat_message(&mut self) {
        if let Some(text) = self.chat.begin_send(&self.cache) {
            self.dispatch(ApiRequest::SendMessage(text));
        }
    }

    pub fn logout(&mut self) {
        self.end_session();
        if let Err(err) = self.session.clear() {
            log::error!("Failed to clear session on logout: {err}");
        }
        if let Err(err) = self.cache.clear() {
            log::warn!("Failed to clear chat cache on logout: {err}");
        }
        self.chat.reset();
        self.navigate(Screen::Login);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Timers: notice expiry and the post-save redirect.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            self.notice = None;
        }
        if self.screen() == Screen::ProfileSetup && self.profile.take_due_redirect(now) {
            self.navigate(Screen::Chat);
        }
    }

    pub fn handle_event(&mut self, event: NetworkEvent, now: Instant) {
        match event {
            NetworkEvent::SessionExpired => {
                self.end_session();
                self.chat.reset();
                self.navigate(Screen::Login);
                self.notice = Some(Notice::error(MSG_SESSION_EXPIRED, now));
            }
            NetworkEvent::Completed {
                origin,
                kind,
                result,
            } => {
                if origin == self.background {
                    self.background_completed(kind, result);
                } else if origin != self.router.activation() {
                    log::debug!("Dropping stale {kind:?} result for activation {origin}");
                } else {
                    self.apply_result(kind, result, now);
                }
            }
        }
    }

    fn background_completed(&mut self, kind: RequestKind, result: Result<ApiReply, ApiError>) {
        if let Err(err) = result {
            log::warn!("Background {kind:?} failed: {err}");
        }
        if kind == RequestKind::RefreshSession && self.refresh_pending {
            self.refresh_pending = false;
            if self.screen() == Screen::Chat {
                self.dispatch(ApiRequest::LoadHistory);
            }
        }
    }

    fn apply_result(&mut self, kind: RequestKind, result: Result<ApiReply, ApiError>, now: Instant) {
        match (kind, result) {
            (RequestKind::Login, Ok(_)) if !self.session.is_logged_in() => {
                log::warn!("Login reported success but no session was stored");
                self.login.fail(None);
            }
            (RequestKind::Register, Ok(_)) if !self.session.is_logged_in() => {
                log::warn!("Registration reported success but no session was stored");
                self.register.fail(None);
            }
            (RequestKind::Login, Ok(_)) => {
                self.login.succeed();
                self.navigate(Screen::ProfileSetup);
            }
            (RequestKind::Login, Err(err)) => self.login.fail(err.server_message()),
            (RequestKind::Register, Ok(ApiReply::Authenticated { message })) => {
                self.register.succeed();
                let message = message.unwrap_or_else(|| DEFAULT_REGISTERED_MESSAGE.to_string());
                self.navigate(Screen::ProfileSetup);
                self.notice = Some(Notice::success(message));
            }
            (RequestKind::Register, Err(err)) => self.register.fail(err.server_message()),
            (RequestKind::LoadProfile, Ok(ApiReply::Profile(profile))) => {
                self.profile.is_loading = false;
                match profile {
                    Some(profile) => self.profile.fill(&profile),
                    None => log::info!("No profile yet; showing empty form"),
                }
            }
            (RequestKind::LoadProfile, Err(err)) => {
                log::warn!("Could not load existing profile: {err}");
                self.profile.is_loading = false;
            }
            (RequestKind::SaveProfile, Ok(ApiReply::ProfileSaved { message })) => {
                self.profile.is_loading = false;
                let message = message.unwrap_or_else(|| DEFAULT_SAVED_MESSAGE.to_string());
                self.notice = Some(Notice::success(message));
                self.profile.schedule_redirect(now);
            }
            (RequestKind::SaveProfile, Err(err)) => {
                self.profile.is_loading = false;
                self.notice = Some(Notice::error(err.user_message(), now));
            }
            (RequestKind::LoadHistory, Ok(ApiReply::History(entries))) => {
                self.chat.apply_history(entries, &self.cache);
            }
            (RequestKind::LoadHistory, Err(_)) => self.chat.history_failed(),
            (RequestKind::SendMessage, Ok(ApiReply::Reply(reply))) => {
                self.chat.receive_reply(reply, &self.cache);
            }
            (RequestKind::SendMessage, Err(_)) => self.chat.reply_failed(&self.cache),
            (kind, Ok(reply)) => log::warn!("Unexpected reply {reply:?} for {kind:?}"),
            (kind, Err(err)) => log::warn!("{kind:?} failed: {err}"),
        }
    }
}
