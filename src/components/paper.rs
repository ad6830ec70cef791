use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, MouseEvent, TouchEvent, TouchList};
use yew::prelude::*;

use crate::listeners::Listeners;
use crate::model::PaperSpec;
use crate::state::{InputMode, MouseButton, PaperGesture, PaperTransform, StackOrder, Vec2};
use crate::util::{clog, cwarn, describe};

/// Papers start tilted somewhere in [-15, 15) degrees.
fn random_tilt() -> f64 {
    js_sys::Math::random() * 30.0 - 15.0
}

fn touch_points(list: &TouchList) -> Vec<Vec2> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Vec2::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn apply_transform(el: &HtmlElement, t: PaperTransform) -> Result<(), JsValue> {
    el.style().set_property("transform", &t.css())
}

fn apply_z_index(el: &HtmlElement, z: i32) -> Result<(), JsValue> {
    el.style().set_property("z-index", &z.to_string())
}

// Handlers have nowhere to propagate to; style failures are logged.
fn report(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        cwarn(&format!("paper {}: {}", what, describe(&err)));
    }
}

fn bind_mouse(
    el: &HtmlElement,
    gesture: &Rc<RefCell<PaperGesture>>,
    stack: &StackOrder,
    listeners: &mut Listeners,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Moves are tracked page-wide so a fast drag cannot outrun the paper.
    {
        let el = el.clone();
        let gesture = gesture.clone();
        listeners.listen(&document, "mousemove", move |e| {
            let e: MouseEvent = e.unchecked_into();
            let client = Vec2::new(e.client_x() as f64, e.client_y() as f64);
            if let Some(t) = gesture.borrow_mut().mouse_move(client) {
                report(apply_transform(&el, t), "transform");
            }
        })?;
    }
    {
        let el_cb = el.clone();
        let gesture = gesture.clone();
        let stack = stack.clone();
        listeners.listen(el, "mousedown", move |e| {
            let e: MouseEvent = e.unchecked_into();
            let button = MouseButton::from_code(e.button());
            let client = Vec2::new(e.client_x() as f64, e.client_y() as f64);
            if let Some(z) = gesture.borrow_mut().mouse_down(button, client, &stack) {
                report(apply_z_index(&el_cb, z), "z-index");
            }
        })?;
    }
    {
        let gesture = gesture.clone();
        listeners.listen(&window, "mouseup", move |_e| {
            gesture.borrow_mut().release();
        })?;
    }
    // Right button is the rotate gesture.
    listeners.listen(el, "contextmenu", move |e| {
        e.prevent_default();
    })?;
    Ok(())
}

fn bind_touch(
    el: &HtmlElement,
    gesture: &Rc<RefCell<PaperGesture>>,
    stack: &StackOrder,
    listeners: &mut Listeners,
) -> Result<(), JsValue> {
    {
        let el_cb = el.clone();
        let gesture = gesture.clone();
        let stack = stack.clone();
        listeners.listen(el, "touchstart", move |e| {
            let e: TouchEvent = e.unchecked_into();
            let touches = touch_points(&e.touches());
            if let Some(z) = gesture.borrow_mut().touch_start(&touches, &stack) {
                report(apply_z_index(&el_cb, z), "z-index");
            }
        })?;
    }
    {
        let el_cb = el.clone();
        let gesture = gesture.clone();
        listeners.listen_active(el, "touchmove", move |e| {
            e.prevent_default();
            let e: TouchEvent = e.unchecked_into();
            let touches = touch_points(&e.touches());
            if let Some(t) = gesture.borrow_mut().touch_move(&touches) {
                report(apply_transform(&el_cb, t), "transform");
            }
        })?;
    }
    for event in ["touchend", "touchcancel"] {
        let gesture = gesture.clone();
        listeners.listen(el, event, move |_e| {
            gesture.borrow_mut().touch_end();
        })?;
    }
    Ok(())
}

/// Wires one paper element to its gesture state. Listeners are returned so the
/// caller can detach them.
pub fn bind_paper(
    el: &HtmlElement,
    mode: InputMode,
    gesture: Rc<RefCell<PaperGesture>>,
    stack: StackOrder,
) -> Result<Listeners, JsValue> {
    apply_transform(el, gesture.borrow().transform())?;
    let mut listeners = Listeners::new();
    let bound = match mode {
        InputMode::Mouse => bind_mouse(el, &gesture, &stack, &mut listeners),
        InputMode::Touch => bind_touch(el, &gesture, &stack, &mut listeners),
    };
    if let Err(err) = bound {
        listeners.remove_all();
        return Err(err);
    }
    clog(&format!("paper bound: {:?}, {} listener(s)", mode, listeners.len()));
    Ok(listeners)
}

#[derive(Properties, PartialEq, Clone)]
pub struct PaperProps {
    pub spec: PaperSpec,
    pub mode: InputMode,
}

#[function_component(Paper)]
pub fn paper(props: &PaperProps) -> Html {
    let node_ref = use_node_ref();
    let gesture = use_mut_ref(|| PaperGesture::new(random_tilt()));
    let stack = use_context::<StackOrder>().unwrap_or_else(|| {
        cwarn("paper rendered outside a StackOrder provider, using the page-wide fallback");
        StackOrder::shared()
    });

    {
        let node_ref = node_ref.clone();
        let gesture = gesture.clone();
        use_effect_with(props.mode, move |mode| {
            let mut bound = node_ref
                .cast::<HtmlElement>()
                .and_then(|el| match bind_paper(&el, *mode, gesture, stack) {
                    Ok(listeners) => Some(listeners),
                    Err(err) => {
                        cwarn(&format!("failed to bind paper: {}", describe(&err)));
                        None
                    }
                });
            move || {
                if let Some(listeners) = bound.as_mut() {
                    listeners.remove_all();
                }
            }
        });
    }

    let mut class = classes!("paper");
    if let Some(extra) = props.spec.kind.class() {
        class.push(extra);
    }

    html! {
        <div ref={node_ref} {class}>
            if let Some(text) = &props.spec.text {
                <p>{ text.clone() }</p>
            }
            if let Some(src) = &props.spec.image {
                <img src={src.clone()} alt="" draggable="false" />
            }
        </div>
    }
}
