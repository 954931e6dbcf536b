use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlScriptElement};
use crate::core::console;
use crate::core::error::BoardError;

// SortableJS, resolved from the page global at call time.
#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Sortable;

    #[wasm_bindgen(constructor)]
    pub fn new(element: &Element, options: &JsValue) -> Sortable;

    #[derive(Debug, Clone)]
    pub type SortableEvent;

    #[wasm_bindgen(method, getter = from)]
    pub fn from_container(this: &SortableEvent) -> Element;

    #[wasm_bindgen(method, getter = to)]
    pub fn to_container(this: &SortableEvent) -> Element;

    #[wasm_bindgen(method, getter = oldDraggableIndex)]
    pub fn old_draggable_index(this: &SortableEvent) -> Option<u32>;

    #[wasm_bindgen(method, getter = newDraggableIndex)]
    pub fn new_draggable_index(this: &SortableEvent) -> Option<u32>;
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SortableOptions {
    pub group: &'static str,
    pub filter: &'static str,
    pub animation: u32,
}

impl SortableOptions {
    /// Cards can move between any card containers.
    pub fn cards() -> Self {
        Self {
            group: "shared",
            filter: ".ignore-elements",
            animation: 150,
        }
    }

    pub fn columns() -> Self {
        Self {
            group: "cols",
            ..Self::cards()
        }
    }
}

fn library_error(value: JsValue) -> BoardError {
    BoardError::DragLibrary(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Makes `element`'s children draggable; `on_end` runs when a drag ends.
/// The handler lives as long as the page.
pub fn attach(
    element: &Element,
    options: &SortableOptions,
    on_end: impl FnMut(SortableEvent) + 'static,
) -> Result<Sortable, BoardError> {
    let js_options = serde_wasm_bindgen::to_value(options)
        .map_err(|e| BoardError::DragLibrary(e.to_string()))?;
    let handler = Closure::<dyn FnMut(SortableEvent)>::new(on_end);
    js_sys::Reflect::set(&js_options, &JsValue::from_str("onEnd"), handler.as_ref())
        .map_err(library_error)?;
    handler.forget();
    Ok(Sortable::new(element, &js_options))
}

pub fn is_loaded() -> bool {
    web_sys::window()
        .map(|window| js_sys::Reflect::has(&window, &JsValue::from_str("Sortable")).unwrap_or(false))
        .unwrap_or(false)
}

/// Ensures the `Sortable` global exists, injecting `src` if it does not.
pub async fn load(src: Option<&str>) -> Result<(), BoardError> {
    if is_loaded() {
        return Ok(());
    }
    let src = src.ok_or_else(|| {
        BoardError::DragLibrary("Sortable is not on the page and no SortableSrc is configured".to_string())
    })?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(BoardError::MissingElement("document"))?;
    let body = document.body().ok_or(BoardError::MissingElement("body"))?;
    let script: HtmlScriptElement = document
        .create_element("script")
        .map_err(library_error)?
        .dyn_into::<HtmlScriptElement>()
        .map_err(|element| library_error(element.into()))?;
    script.set_src(src);

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    body.append_child(&script).map_err(library_error)?;
    JsFuture::from(loaded)
        .await
        .map_err(|_| BoardError::DragLibrary(format!("failed to load {}", src)))?;

    if is_loaded() {
        console::log(&format!("Loaded drag library from {}", src));
        Ok(())
    } else {
        Err(BoardError::DragLibrary(format!("{} did not define Sortable", src)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_and_column_groups_are_separate() {
        assert_eq!(
            serde_json::to_value(SortableOptions::cards()).unwrap(),
            json!({"group": "shared", "filter": ".ignore-elements", "animation": 150})
        );
        assert_eq!(SortableOptions::columns().group, "cols");
        assert_eq!(SortableOptions::columns().animation, 150);
    }
}
