use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;

/// Title bar with the overflow menu holding "Clear chat".
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Any click that reaches the window closes the menu; the toggle stops propagation.
    let close_on_outside_click = window_event_listener(ev::click, move |_| {
        if state.menu_open.get_untracked() {
            state.set_menu_open.set(false);
        }
    });
    on_cleanup(move || close_on_outside_click.remove());

    let on_toggle = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        state.set_menu_open.update(|open| *open = !*open);
    };

    view! {
        <header class="chat-header">
            <h1>"Gemini Chat"</h1>
            <div class="menu">
                <button class="menu-btn" aria-label="Menu" on:click=on_toggle>
                    "⋮"
                </button>
                <div class="menu-dropdown" class:hidden=move || !state.menu_open.get()>
                    <button class="menu-item" on:click=move |_| state.clear()>
                        "Clear chat"
                    </button>
                </div>
            </div>
        </header>
    }
}
