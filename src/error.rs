use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the browser boundary. The editor core itself never fails;
/// these are logged by the view and never surfaced as panics.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to load image {url}: {reason}")]
    ImageLoad { url: String, reason: String },

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("random source unavailable: {0}")]
    Random(String),
}

impl EditorError {
    pub fn canvas(value: JsValue) -> Self {
        Self::Canvas(js_message(&value))
    }
}

impl From<getrandom::Error> for EditorError {
    fn from(err: getrandom::Error) -> Self {
        Self::Random(err.to_string())
    }
}

/// Best-effort text for a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
