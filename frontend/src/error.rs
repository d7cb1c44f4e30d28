use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for InteractionError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => InteractionError::Js(message),
            None => InteractionError::Js(format!("{:?}", value)),
        }
    }
}
