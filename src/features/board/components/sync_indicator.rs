use leptos::prelude::*;
use crate::core::models::SyncStatus;
use crate::features::board::surface::reload_page;

// Fixed banner showing the outcome of the latest board request
#[component]
pub fn SyncIndicator(status: RwSignal<SyncStatus>) -> impl IntoView {
    let is_failed = move || status.with(|s| s.is_failed());

    view! {
        <div
            class="board-sync-status"
            class:hidden=move || status.with(|s| *s == SyncStatus::Idle)
            class:error=is_failed
            role="status"
            aria-live="polite"
        >
            <span class="board-sync-message">{move || status.with(|s| s.label())}</span>
            <Show when=is_failed>
                <div class="board-sync-actions">
                    <button class="ui tiny button" on:click=move |_| reload_page()>"Reload"</button>
                    <button class="ui tiny basic button" on:click=move |_| status.set(SyncStatus::Idle)>"Dismiss"</button>
                </div>
            </Show>
        </div>
    }
}
