//! Error type shared by every fallible operation in the crate.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum FireworksError {
    #[error("no canvas matches selector {selector:?}")]
    CanvasNotFound { selector: String },
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("no browser window")]
    NoWindow,
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("dom call failed: {0}")]
    Js(String),
}

impl From<JsValue> for FireworksError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<FireworksError> for JsValue {
    fn from(err: FireworksError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
