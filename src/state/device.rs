use wasm_bindgen::JsValue;

/// Which family of listeners a paper binds. Picked once per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Mouse,
    Touch,
}

impl InputMode {
    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return InputMode::Mouse;
        };
        let has_ontouchstart =
            js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
        Self::from_capabilities(has_ontouchstart, window.navigator().max_touch_points())
    }

    pub fn from_capabilities(has_ontouchstart: bool, max_touch_points: i32) -> Self {
        if has_ontouchstart || max_touch_points > 0 {
            InputMode::Touch
        } else {
            InputMode::Mouse
        }
    }
}
