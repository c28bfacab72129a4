use serde::{Deserialize, Serialize};

/// One turn of the conversation as the backend expects it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatTurn {
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".to_string(), text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: "model".to_string(), text: text.into() }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub conversation: Vec<ChatTurn>,
    pub model: String,
}

/// Successful response from `POST /api/chat`.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub result: String,
}

/// Error body returned alongside a non-2xx status.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryBody {
    /// Plain text typed by the user.
    Text(String),
    /// Bot reply still in flight; rendered as typing dots.
    Pending,
    /// Bot reply: Markdown source plus its rendered HTML.
    Markdown { source: String, html: String },
    /// Static bot line that is not part of the model conversation.
    Notice(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
    pub id: u64,
    pub sender: Sender,
    pub body: EntryBody,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Warning,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Error => "toast toast-error",
            ToastKind::Warning => "toast toast-warning",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Error => "!",
            ToastKind::Warning => "i",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}
