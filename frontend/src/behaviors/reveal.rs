use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::PageConfig;
use crate::dom::Page;
use crate::error::InteractionError;

/// Per-element reveal flag. Once revealed it stays revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

impl RevealState {
    pub fn observe(self, is_intersecting: bool) -> RevealState {
        match self {
            RevealState::Revealed => RevealState::Revealed,
            RevealState::Hidden if is_intersecting => RevealState::Revealed,
            RevealState::Hidden => RevealState::Hidden,
        }
    }
}

/// Watches every `.reveal` element and marks it revealed the first time it
/// crosses the visibility threshold.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Reveal {
    pub fn attach(page: &Page, config: &PageConfig) -> Result<Option<Self>, InteractionError> {
        let elements = page.query_all(&config.reveal_selector)?;
        if elements.is_empty() {
            return Ok(None);
        }

        let revealed_class = config.revealed_class.clone();
        let on_entries = move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let current = if target.class_list().contains(&revealed_class) {
                    RevealState::Revealed
                } else {
                    RevealState::Hidden
                };
                if current.observe(entry.is_intersecting()) == RevealState::Revealed
                    && current == RevealState::Hidden
                {
                    let _ = target.class_list().add_1(&revealed_class);
                    // Nothing left to do for this element.
                    observer.unobserve(&target);
                }
            }
        };
        let callback =
            Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
        options.set_root_margin(&config.reveal_root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for el in &elements {
            observer.observe(el);
        }
        debug!("Reveal observing {} elements", elements.len());

        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
