use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoardError {
    #[error("window.config is missing or malformed")]
    MissingConfig,

    #[error("csrf token is empty")]
    MissingCsrf,

    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("{element} has no {attribute} attribute")]
    MissingData {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("{attribute}={value:?} is not a valid id")]
    InvalidId {
        attribute: &'static str,
        value: String,
    },

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("drag library unavailable: {0}")]
    DragLibrary(String),
}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        BoardError::Encode(e.to_string())
    }
}
