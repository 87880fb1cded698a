use crate::common::{Author, ChatMessage, HistoryEntry};
use crate::storage::ChatCache;

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again.";

const USER_TAGS: [&str; 3] = ["usuário:", "usuario:", "user:"];
const ASSISTANT_TAGS: [&str; 2] = ["ia:", "assistant:"];

/// Turn server history into messages.
///
/// Tagged strings lose their speaker prefix (matched case-insensitively),
/// untagged strings are treated as assistant text, `{role, content}`
/// records map `user` to the user and everything else to the assistant.
/// Anything else becomes an empty assistant message.
pub fn normalize_history(entries: Vec<HistoryEntry>) -> Vec<ChatMessage> {
    entries.into_iter().map(normalize_entry).collect()
}

fn normalize_entry(entry: HistoryEntry) -> ChatMessage {
    match entry {
        HistoryEntry::Tagged(line) => {
            if let Some(rest) = USER_TAGS.iter().find_map(|tag| strip_tag(&line, tag)) {
                ChatMessage::user(rest.trim())
            } else if let Some(rest) = ASSISTANT_TAGS.iter().find_map(|tag| strip_tag(&line, tag)) {
                ChatMessage::assistant(rest.trim())
            } else {
                ChatMessage::assistant(line)
            }
        }
        HistoryEntry::Record { role, content } => {
            if role.trim().eq_ignore_ascii_case("user") {
                ChatMessage::user(content)
            } else {
                ChatMessage::assistant(content)
            }
        }
        HistoryEntry::Unrecognized(value) => {
            log::debug!("Unrecognized history entry: {value}");
            ChatMessage::assistant("")
        }
    }
}

/// Case-insensitive prefix strip that respects char boundaries.
fn strip_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let tag_len = tag.chars().count();
    let split_at = line
        .char_indices()
        .nth(tag_len)
        .map(|(index, _)| index)
        .unwrap_or(line.len());
    let (head, rest) = line.split_at(split_at);
    (head.chars().count() == tag_len && head.to_lowercase() == tag).then_some(rest)
}

/// Scroll intent raised by the session, consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub force: bool,
}

/// The conversation on screen: cache-first paint, server reconciliation
/// and optimistic sends.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pub draft: String,
    loading_history: bool,
    awaiting_reply: bool,
    pending_scroll: Option<ScrollRequest>,
}

impl ChatSession {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading_history(&self) -> bool {
        self.loading_history
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Paint from the cache. The caller then fetches server history.
    pub fn activate(&mut self, cache: &ChatCache) {
        self.messages = cache.load();
        self.loading_history = self.messages.is_empty();
        self.awaiting_reply = false;
        self.request_scroll(true);
    }

    pub fn apply_history(&mut self, entries: Vec<HistoryEntry>, cache: &ChatCache) {
        self.messages = normalize_history(entries);
        self.loading_history = false;
        persist(cache, &self.messages);
        self.request_scroll(true);
    }

    /// Server history unavailable: keep whatever the cache gave us.
    pub fn history_failed(&mut self) {
        self.loading_history = false;
    }

    /// Append the draft as a user message and return the text to send.
    pub fn begin_send(&mut self, cache: &ChatCache) -> Option<String> {
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text.clone()));
        persist(cache, &self.messages);
        self.draft.clear();
        self.awaiting_reply = true;
        self.request_scroll(true);
        Some(text)
    }

    pub fn receive_reply(&mut self, reply: String, cache: &ChatCache) {
        self.finish_reply(ChatMessage::assistant(reply), cache);
    }

    /// The user's message stays; an apology takes the reply's place.
    pub fn reply_failed(&mut self, cache: &ChatCache) {
        self.finish_reply(ChatMessage::assistant(FALLBACK_REPLY), cache);
    }

    fn finish_reply(&mut self, message: ChatMessage, cache: &ChatCache) {
        self.messages.push(message);
        self.awaiting_reply = false;
        persist(cache, &self.messages);
        self.request_scroll(false);
    }

    pub fn go_to_bottom(&mut self) {
        self.request_scroll(true);
    }

    fn request_scroll(&mut self, force: bool) {
        let force = force || self.pending_scroll.is_some_and(|pending| pending.force);
        self.pending_scroll = Some(ScrollRequest { force });
    }

    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn persist(cache: &ChatCache, messages: &[ChatMessage]) {
    if let Err(err) = cache.save(messages) {
        log::warn!("Failed to persist chat cache: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use crate::ui::scroll::ScrollTracker;

    fn cache() -> ChatCache {
        ChatCache::new(LocalStore::in_memory().unwrap())
    }

    fn tagged(line: &str) -> HistoryEntry {
        HistoryEntry::Tagged(line.to_string())
    }

    #[test]
    fn user_tag_is_case_insensitive_and_trimmed() {
        for line in ["usuário: Hello there ", "USUÁRIO:Hello there", "Usuário:   Hello there"] {
            let message = &normalize_history(vec![tagged(line)])[0];
            assert_eq!(message.author, Author::User, "{line}");
            assert_eq!(message.text, "Hello there", "{line}");
        }
    }

    #[test]
    fn assistant_and_fallback_entries() {
        let messages = normalize_history(vec![
            tagged("IA: Good morning!"),
            tagged("user: plain english tag"),
            tagged("no tag at all"),
            HistoryEntry::Record {
                role: "user".into(),
                content: "from record".into(),
            },
            HistoryEntry::Record {
                role: "ia".into(),
                content: "reply record".into(),
            },
            HistoryEntry::Unrecognized(serde_json::json!({"weird": 1})),
        ]);

        assert_eq!(messages[0], ChatMessage::assistant("Good morning!"));
        assert_eq!(messages[1], ChatMessage::user("plain english tag"));
        assert_eq!(messages[2], ChatMessage::assistant("no tag at all"));
        assert_eq!(messages[3], ChatMessage::user("from record"));
        assert_eq!(messages[4], ChatMessage::assistant("reply record"));
        assert_eq!(messages[5], ChatMessage::assistant(""));
    }

    #[test]
    fn short_lines_do_not_match_tags() {
        assert_eq!(strip_tag("ia", "ia:"), None);
        assert_eq!(strip_tag("", "user:"), None);
        assert_eq!(strip_tag("ia:", "ia:"), Some(""));
    }

    #[test]
    fn activation_paints_cache_and_only_flags_loading_when_empty() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.activate(&cache);
        assert!(session.is_loading_history());
        assert_eq!(session.take_scroll_request(), Some(ScrollRequest { force: true }));

        cache.save(&[ChatMessage::user("cached")]).unwrap();
        session.activate(&cache);
        assert!(!session.is_loading_history());
        assert_eq!(session.messages(), &[ChatMessage::user("cached")]);
    }

    #[test]
    fn server_history_replaces_cache_and_is_persisted() {
        let cache = cache();
        cache.save(&[ChatMessage::user("stale")]).unwrap();
        let mut session = ChatSession::default();
        session.activate(&cache);

        session.apply_history(vec![tagged("usuário: hi"), tagged("ia: hello")], &cache);

        let expected = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        assert_eq!(session.messages(), expected.as_slice());
        assert_eq!(cache.load(), expected);
    }

    #[test]
    fn history_failure_keeps_cached_messages() {
        let cache = cache();
        cache.save(&[ChatMessage::user("cached")]).unwrap();
        let mut session = ChatSession::default();
        session.activate(&cache);

        session.history_failed();

        assert!(!session.is_loading_history());
        assert_eq!(session.messages(), &[ChatMessage::user("cached")]);
    }

    #[test]
    fn blank_draft_sends_nothing() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.draft = "   \n".into();
        assert_eq!(session.begin_send(&cache), None);
        assert!(session.messages().is_empty());
    }

    #[test]
    fn send_is_optimistic_and_persisted_before_reply() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.draft = "  How do I say 'saudade'?  ".into();

        let text = session.begin_send(&cache);

        assert_eq!(text.as_deref(), Some("How do I say 'saudade'?"));
        assert!(session.draft.is_empty());
        assert!(session.is_awaiting_reply());
        assert_eq!(cache.load(), vec![ChatMessage::user("How do I say 'saudade'?")]);
        assert_eq!(session.take_scroll_request(), Some(ScrollRequest { force: true }));

        session.receive_reply("There is no exact word.".into(), &cache);
        assert!(!session.is_awaiting_reply());
        assert_eq!(cache.load().len(), 2);
        assert_eq!(session.take_scroll_request(), Some(ScrollRequest { force: false }));
    }

    #[test]
    fn offline_send_appends_exactly_one_apology() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.draft = "hello".into();
        session.begin_send(&cache);

        session.reply_failed(&cache);

        assert_eq!(
            session.messages(),
            &[ChatMessage::user("hello"), ChatMessage::assistant(FALLBACK_REPLY)]
        );
        assert_eq!(cache.load(), session.messages());
    }

    #[test]
    fn reply_scroll_follows_only_near_bottom() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.draft = "hi".into();
        session.begin_send(&cache);
        session.take_scroll_request();
        session.receive_reply("hello".into(), &cache);
        let request = session.take_scroll_request().unwrap();

        let mut tracker = ScrollTracker::default();
        tracker.observe(960.0, 400.0, 1400.0);
        assert!(tracker.should_scroll(request.force));

        tracker.observe(200.0, 400.0, 1400.0);
        assert!(!tracker.should_scroll(request.force));
    }

    #[test]
    fn pending_forced_scroll_is_not_downgraded() {
        let cache = cache();
        let mut session = ChatSession::default();
        session.draft = "hi".into();
        session.begin_send(&cache);
        session.receive_reply("hello".into(), &cache);
        assert_eq!(session.take_scroll_request(), Some(ScrollRequest { force: true }));
        assert_eq!(session.take_scroll_request(), None);
    }
}
