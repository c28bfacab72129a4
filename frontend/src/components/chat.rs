use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;

use crate::models::{ChatEntry, EntryBody, Sender};
use crate::state::{AppState, MODELS};

/// Message history plus the input form.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let chat_box = NodeRef::<Div>::new();

    // Keep the newest message in view
    Effect::new(move |_| {
        state.entries.track();
        request_animation_frame(move || {
            if let Some(el) = chat_box.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    });

    view! {
        <main class="chat-area">
            <div class="messages-container" node_ref=chat_box>
                <For
                    each=move || state.entries.get()
                    key=|entry| (entry.id, entry.body.clone())
                    let:entry
                >
                    <MessageBubble entry=entry />
                </For>
            </div>
            <ChatInput />
        </main>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(entry: ChatEntry) -> impl IntoView {
    let body = match entry.body {
        EntryBody::Text(text) | EntryBody::Notice(text) => view! { <div>{text}</div> }.into_any(),
        EntryBody::Pending => view! {
            <div class="typing">
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
            </div>
        }
        .into_any(),
        EntryBody::Markdown { html, .. } => view! { <div class="prose" inner_html=html></div> }.into_any(),
    };

    match entry.sender {
        Sender::User => view! {
            <div class="message user">
                <div class="avatar">"You"</div>
                <div class="bubble">{body}</div>
            </div>
        }
        .into_any(),
        Sender::Bot => view! {
            <div class="message bot">
                <div class="avatar">"AI"</div>
                <div class="bubble-column">
                    <span class="role-label">"Gemini"</span>
                    <div class="bubble">{body}</div>
                </div>
            </div>
        }
        .into_any(),
    }
}

/// Text input, model dropdown and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_sending = move || state.is_sending.get();

    let send = move || {
        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || state.is_sending.get_untracked() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <form class="input-area" on:submit=on_submit>
            <select
                class="model-select"
                prop:value=move || state.model.get()
                on:change=move |ev| state.set_model.set(event_target_value(&ev))
            >
                {MODELS
                    .iter()
                    .map(|model| view! { <option value=*model>{*model}</option> })
                    .collect_view()}
            </select>
            <input
                type="text"
                autocomplete="off"
                placeholder="Type a message…"
                prop:value=input
                on:input=move |ev| set_input.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="send-btn"
                disabled=move || is_sending() || input.get().trim().is_empty()
            >
                {move || if is_sending() { "Sending…" } else { "Send" }}
            </button>
        </form>
    }
}
