use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::editor::Bitmap;
use crate::error::{js_message, EditorError};

/// Fetch and decode a remote image. One attempt, no timeout; the caller
/// decides what to do if it fails.
pub async fn load_bitmap(url: &str) -> Result<(HtmlImageElement, Bitmap), EditorError> {
    let load_error = |reason: String| EditorError::ImageLoad {
        url: url.to_string(),
        reason,
    };

    let element = HtmlImageElement::new().map_err(|e| load_error(js_message(&e)))?;
    element.set_src(url);
    JsFuture::from(element.decode())
        .await
        .map_err(|e| load_error(js_message(&e)))?;

    let bitmap = Bitmap {
        url: url.to_string(),
        width: element.natural_width() as f64,
        height: element.natural_height() as f64,
    };
    log::debug!("decoded {url} ({}x{})", bitmap.width, bitmap.height);
    Ok((element, bitmap))
}
