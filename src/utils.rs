use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::scene::DVec2;

/// Mouse position in canvas pixels. Accounts for the element being displayed
/// at a different size than its backing store.
pub fn client_to_canvas_coords(event: &MouseEvent, canvas: &HtmlCanvasElement) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();

    let x = event.client_x() as f64 - rect.left();
    let y = event.client_y() as f64 - rect.top();

    let scale_x = if rect.width() > 0.0 {
        canvas.width() as f64 / rect.width()
    } else {
        1.0
    };
    let scale_y = if rect.height() > 0.0 {
        canvas.height() as f64 / rect.height()
    } else {
        1.0
    };

    DVec2::new(x * scale_x, y * scale_y)
}

/// Whether a keyboard event is aimed at a text field or other editable element
pub fn targets_editable(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map(|el| {
            let tag = el.tag_name();
            el.is_content_editable()
                || tag.eq_ignore_ascii_case("input")
                || tag.eq_ignore_ascii_case("textarea")
                || tag.eq_ignore_ascii_case("select")
        })
        .unwrap_or(false)
}

/// Keys that delete the selected shape
pub fn is_delete_key(key: &str) -> bool {
    matches!(key, "Delete" | "Backspace")
}
