//! Background preloading and lazy reveal of inline images.
//!
//! Both paths only ever add the configured marker class; CSS does the actual
//! fade-in. A failed fetch leaves its targets unmarked.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, NodeList,
};

use crate::model::{BoardConfig, PreloadEntry};
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStrategy {
    /// Mark each image the first time it scrolls into view.
    Observe,
    /// No observer support: mark everything right away.
    Immediate,
}

impl RevealStrategy {
    pub fn detect(window: &web_sys::Window) -> Self {
        let supported =
            js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if supported {
            RevealStrategy::Observe
        } else {
            RevealStrategy::Immediate
        }
    }
}

/// Handles one batch of observer entries: every intersecting target is
/// revealed and then released so it is never looked at again. Returns how many
/// were revealed.
pub fn reveal_intersecting<T>(
    entries: impl IntoIterator<Item = (bool, T)>,
    mut reveal: impl FnMut(&T),
    mut release: impl FnMut(&T),
) -> usize {
    let mut count = 0;
    for (intersecting, target) in entries {
        if !intersecting {
            continue;
        }
        reveal(&target);
        release(&target);
        count += 1;
    }
    count
}

pub struct ImageLoader {
    document: Document,
    loaded_class: String,
    preload: Vec<PreloadEntry>,
}

impl ImageLoader {
    pub fn new(document: Document, config: &BoardConfig) -> Self {
        Self {
            document,
            loaded_class: config.loaded_class.clone(),
            preload: config.preload.clone(),
        }
    }

    pub fn start(&self, strategy: RevealStrategy) -> Result<(), JsValue> {
        self.preload_backgrounds()?;
        self.reveal_regular_images(strategy)
    }

    /// Starts every preload. The off-DOM images are returned so callers can
    /// tell when they have settled.
    pub fn preload_backgrounds(&self) -> Result<Vec<HtmlImageElement>, JsValue> {
        let mut pending = Vec::with_capacity(self.preload.len());
        for entry in &self.preload {
            // Targets are fixed now; papers added later are not picked up.
            let targets = elements(&self.document.query_selector_all(&entry.selector)?);
            let img = HtmlImageElement::new()?;

            let onload = {
                let class = self.loaded_class.clone();
                let category = entry.category.clone();
                Closure::once(move || {
                    for el in &targets {
                        let _ = mark(el, &class);
                    }
                    clog(&format!("preload {}: marked {} element(s)", category, targets.len()));
                })
            };
            let onerror = {
                let category = entry.category.clone();
                let url = entry.url.clone();
                Closure::once(move || {
                    cwarn(&format!("preload {} failed: {}", category, url));
                })
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            img.set_src(&entry.url);
            onload.forget();
            onerror.forget();
            pending.push(img);
        }
        Ok(pending)
    }

    pub fn reveal_regular_images(&self, strategy: RevealStrategy) -> Result<(), JsValue> {
        let images = elements(&self.document.query_selector_all("img")?);
        match strategy {
            RevealStrategy::Immediate => {
                for img in &images {
                    mark(img, &self.loaded_class)?;
                }
                clog(&format!("no IntersectionObserver, revealed {} image(s)", images.len()));
            }
            RevealStrategy::Observe => {
                let class = self.loaded_class.clone();
                let callback = Closure::wrap(Box::new(
                    move |entries: js_sys::Array, observer: IntersectionObserver| {
                        let batch = entries
                            .iter()
                            .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                            .map(|e| (e.is_intersecting(), e.target()));
                        reveal_intersecting(
                            batch,
                            |img| {
                                let _ = mark(img, &class);
                            },
                            |img| observer.unobserve(img),
                        );
                    },
                )
                    as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
                let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
                for img in &images {
                    observer.observe(img);
                }
                // Lives as long as the page.
                callback.forget();
            }
        }
        Ok(())
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn mark(el: &Element, class: &str) -> Result<(), JsValue> {
    el.class_list().add_1(class)
}
