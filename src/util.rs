// Browser event helpers.
use wasm_bindgen::JsValue;
use web_sys::{DomRect, Touch, TouchList};

use crate::state::TouchPoint;

/// Maps a viewport position to canvas-local pixels.
pub fn canvas_point(identifier: i32, client_x: f64, client_y: f64, left: f64, top: f64) -> TouchPoint {
    TouchPoint::new(identifier, client_x - left, client_y - top)
}

// web-sys types clientX/clientY as i32; the DOM value is a double, so read
// it directly to keep sub-pixel positions.
fn client_coord(touch: &Touch, key: &str, truncated: i32) -> f64 {
    js_sys::Reflect::get(touch, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(truncated as f64)
}

/// Converts a touch list to canvas-local points, preserving list order.
pub fn touch_points(list: &TouchList, rect: &DomRect) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| {
            canvas_point(
                t.identifier(),
                client_coord(&t, "clientX", t.client_x()),
                client_coord(&t, "clientY", t.client_y()),
                rect.left(),
                rect.top(),
            )
        })
        .collect()
}
