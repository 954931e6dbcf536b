use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use crate::core::console;
use crate::core::models::SyncStatus;
use super::dom;

/// How long a "Saved" notice stays up before the indicator goes idle.
const SAVED_NOTICE_MS: u32 = 2_000;

/// Page-wide effects of a finished action.
pub trait BoardSurface {
    fn reload(&self);
    fn close_modals(&self);
    fn report(&self, status: SyncStatus);
}

/// The input a board title is typed into.
pub trait TitleField {
    fn title(&self) -> String;
    /// Drops the unsaved-changes marker from the owning form.
    fn mark_clean(&self);
}

pub trait LabelText {
    fn set_text(&self, text: &str);
}

/// A board header without a label still gets renamed on the server.
impl<L: LabelText> LabelText for Option<L> {
    fn set_text(&self, text: &str) {
        if let Some(label) = self {
            label.set_text(text);
        }
    }
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            console::error(&format!("Failed to reload page: {:?}", e));
        }
    }
}

/// Hides every `.ui.modal` through the Fomantic jQuery plugin so its own
/// bookkeeping stays in step. `false` when the plugin is not on the page.
fn hide_with_plugin(window: &web_sys::Window) -> bool {
    let Ok(jquery) = js_sys::Reflect::get(window, &JsValue::from_str("$")) else {
        return false;
    };
    let Some(jquery) = jquery.dyn_ref::<js_sys::Function>() else {
        return false;
    };
    let Ok(modals) = jquery.call1(&JsValue::NULL, &JsValue::from_str(".ui.modal")) else {
        return false;
    };
    let Ok(plugin) = js_sys::Reflect::get(&modals, &JsValue::from_str("modal")) else {
        return false;
    };
    let Some(plugin) = plugin.dyn_ref::<js_sys::Function>() else {
        return false;
    };
    plugin.call1(&modals, &JsValue::from_str("hide")).is_ok()
}

/// The live page: reloads through `window.location`, reports into the
/// signal the `SyncIndicator` renders.
#[derive(Debug, Clone, Copy)]
pub struct DomSurface {
    status: RwSignal<SyncStatus>,
}

impl DomSurface {
    pub fn new(status: RwSignal<SyncStatus>) -> Self {
        Self { status }
    }
}

impl BoardSurface for DomSurface {
    fn reload(&self) {
        reload_page();
    }

    fn close_modals(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if hide_with_plugin(&window) {
            return;
        }
        // No plugin: drop the classes it would have removed.
        let Some(document) = window.document() else {
            return;
        };
        for modal in dom::query_all(&document, ".ui.modal.active, .ui.modal.visible") {
            let classes = modal.class_list();
            let _ = classes.remove_2("active", "visible");
            let _ = classes.add_1("hidden");
        }
        for dimmer in dom::query_all(&document, ".ui.dimmer.active") {
            let _ = dimmer.class_list().remove_2("active", "visible");
        }
        if let Some(body) = document.body() {
            let _ = body.class_list().remove_1("dimmed");
        }
    }

    fn report(&self, status: SyncStatus) {
        let status_signal = self.status;
        if let SyncStatus::Saved(action) = status {
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(SAVED_NOTICE_MS).await;
                // A newer action may have replaced the notice meanwhile.
                if status_signal.get_untracked() == SyncStatus::Saved(action) {
                    status_signal.set(SyncStatus::Idle);
                }
            });
        }
        status_signal.set(status);
    }
}
