use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use crate::core::error::BoardError;

/// Page-level settings the server renders into `window.config`.
///
/// Read once at startup and handed to the controller; nothing below
/// `app::init_project` looks at the global again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BoardConfig {
    #[serde(default)]
    pub csrf: String,
    #[serde(rename = "PageIsProjects", default)]
    pub page_is_projects: bool,
    /// Script to inject when `Sortable` is not already on the page.
    #[serde(rename = "SortableSrc", default, skip_serializing_if = "Option::is_none")]
    pub sortable_src: Option<String>,
}

impl BoardConfig {
    pub fn new(csrf: impl Into<String>) -> Self {
        Self {
            csrf: csrf.into(),
            page_is_projects: true,
            sortable_src: None,
        }
    }

    pub fn from_js(value: JsValue) -> Result<Self, BoardError> {
        if value.is_undefined() || value.is_null() {
            return Err(BoardError::MissingConfig);
        }
        serde_wasm_bindgen::from_value(value).map_err(|_| BoardError::MissingConfig)
    }

    pub fn from_window() -> Result<Self, BoardError> {
        let window = web_sys::window().ok_or(BoardError::MissingConfig)?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str("config"))
            .map_err(|_| BoardError::MissingConfig)?;
        Self::from_js(value)
    }

    /// A projects page without a token would have every request rejected.
    pub fn validate(self) -> Result<Self, BoardError> {
        if self.page_is_projects && self.csrf.trim().is_empty() {
            return Err(BoardError::MissingCsrf);
        }
        Ok(self)
    }
}
