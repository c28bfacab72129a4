use leptos::prelude::*;

use crate::state::AppState;

/// Stack of transient notifications in the corner of the screen.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toast-container">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                {
                    let id = toast.id;
                    let class = toast.kind.css_class();
                    let icon = toast.kind.icon();
                    view! {
                        <div class=class>
                            <span class="toast-icon">{icon}</span>
                            <span class="toast-message">{toast.message}</span>
                            <button
                                class="toast-close"
                                aria-label="Close"
                                on:click=move |_| state.dismiss_toast(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
