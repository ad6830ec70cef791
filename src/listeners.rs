use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// DOM listeners owned by one component; `remove_all` detaches them on unmount.
#[derive(Default)]
pub struct Listeners {
    bound: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        self.bound.push((target.clone(), event, cb));
        Ok(())
    }

    /// Non-passive registration, required for `prevent_default` on touchmove.
    pub fn listen_active(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.as_ref().unchecked_ref(),
            &opts,
        )?;
        self.bound.push((target.clone(), event, cb));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn remove_all(&mut self) {
        for (target, event, cb) in self.bound.drain(..) {
            let _ = target.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
    }
}
