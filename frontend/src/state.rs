use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::markdown::render_markdown;
use crate::models::{ChatEntry, ChatRequest, ChatTurn, EntryBody, Sender, Toast, ToastKind};

pub const MODELS: [&str; 2] = ["gemini-2.5-flash", "gemini-2.0-flash"];

pub const WELCOME_TEXT: &str = "Hello! I'm Gemini. Ask me anything.";
pub const CLEARED_TEXT: &str = "Conversation cleared. Ready for a new topic!";
pub const EMPTY_REPLY_TEXT: &str = "Sorry, no response received.";
pub const FAILED_REPLY_TEXT: &str = "Failed to get response from server.";

const TOAST_MILLIS: u32 = 3_000;

/// Builds the conversation sent upstream from what is on screen: user turns
/// and successful bot replies, in order. Notices and pending entries are skipped.
pub fn build_conversation(entries: &[ChatEntry]) -> Vec<ChatTurn> {
    entries
        .iter()
        .filter_map(|entry| match (&entry.sender, &entry.body) {
            (Sender::User, EntryBody::Text(text)) => Some(ChatTurn::user(text)),
            (Sender::Bot, EntryBody::Markdown { source, .. }) => Some(ChatTurn::model(source)),
            _ => None,
        })
        .collect()
}

/// Decides what replaces the pending bot entry once the backend answers,
/// and which toast, if any, to raise.
pub fn settle_reply(reply: Result<String, String>) -> (EntryBody, Option<(ToastKind, String)>) {
    match reply {
        Ok(result) if !result.trim().is_empty() => {
            let source = result.trim().to_string();
            let html = render_markdown(&source);
            (EntryBody::Markdown { source, html }, None)
        }
        Ok(_) => (
            EntryBody::Notice(EMPTY_REPLY_TEXT.to_string()),
            Some((ToastKind::Warning, "Empty response from server".to_string())),
        ),
        Err(message) => (
            EntryBody::Notice(FAILED_REPLY_TEXT.to_string()),
            Some((ToastKind::Error, message)),
        ),
    }
}

/// Entries shown right after the history is cleared.
pub fn cleared_entries(id: u64) -> Vec<ChatEntry> {
    vec![ChatEntry { id, sender: Sender::Bot, body: EntryBody::Notice(CLEARED_TEXT.to_string()) }]
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub entries: ReadSignal<Vec<ChatEntry>>,
    pub toasts: ReadSignal<Vec<Toast>>,
    pub is_sending: ReadSignal<bool>,
    pub model: ReadSignal<String>,
    pub menu_open: ReadSignal<bool>,

    // --- Write signals (for mutating state) ---
    pub set_entries: WriteSignal<Vec<ChatEntry>>,
    pub set_toasts: WriteSignal<Vec<Toast>>,
    pub set_is_sending: WriteSignal<bool>,
    pub set_model: WriteSignal<String>,
    pub set_menu_open: WriteSignal<bool>,

    next_id: StoredValue<u64>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (entries, set_entries) = signal(Vec::<ChatEntry>::new());
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        let (is_sending, set_is_sending) = signal(false);
        let (model, set_model) = signal(MODELS[0].to_string());
        let (menu_open, set_menu_open) = signal(false);

        let state = Self {
            entries,
            toasts,
            is_sending,
            model,
            menu_open,
            set_entries,
            set_toasts,
            set_is_sending,
            set_model,
            set_menu_open,
            next_id: StoredValue::new(0),
        };
        state.push_entry(Sender::Bot, EntryBody::Notice(WELCOME_TEXT.to_string()));

        provide_context(state);
        state
    }

    fn next_id(&self) -> u64 {
        self.next_id.update_value(|id| *id += 1);
        self.next_id.get_value()
    }

    fn push_entry(&self, sender: Sender, body: EntryBody) -> u64 {
        let id = self.next_id();
        self.set_entries.update(|entries| entries.push(ChatEntry { id, sender, body }));
        id
    }

    fn replace_entry(&self, id: u64, body: EntryBody) {
        self.set_entries.update(|entries| {
            if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
                entry.body = body;
            }
        });
    }

    /// Appends the user message and a pending bot reply, then fills the reply
    /// in from the backend.
    pub fn send_message(&self, text: String) {
        self.push_entry(Sender::User, EntryBody::Text(text));
        let conversation = build_conversation(&self.entries.get_untracked());
        let bot_id = self.push_entry(Sender::Bot, EntryBody::Pending);

        let request = ChatRequest { conversation, model: self.model.get_untracked() };
        self.set_is_sending.set(true);

        let state = *self;
        spawn_local(async move {
            let reply = api::send_chat(&request).await;
            if let Err(message) = &reply {
                log::error!("Error fetching chat response: {message}");
            }
            let (body, toast) = settle_reply(reply);
            if let Some((kind, message)) = toast {
                state.show_toast(kind, message);
            }
            state.replace_entry(bot_id, body);
            state.set_is_sending.set(false);
        });
    }

    /// Empties the visible history. Nothing is stored server-side.
    pub fn clear(&self) {
        let id = self.next_id();
        self.set_entries.set(cleared_entries(id));
        self.set_menu_open.set(false);
    }

    pub fn show_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id();
        let toast = Toast { id, kind, message: message.into() };
        self.set_toasts.update(|toasts| toasts.push(toast));

        let state = *self;
        Timeout::new(TOAST_MILLIS, move || state.dismiss_toast(id)).forget();
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}
