// Console helpers shared by the loader and the paper bindings

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    // Debug builds only, keeps release consoles quiet
    if cfg!(debug_assertions) {
        web_sys::console::log_1(&JsValue::from_str(msg));
    }
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Renders a JS error value for a log line.
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
