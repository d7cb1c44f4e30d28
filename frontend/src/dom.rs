use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window,
};

use crate::error::InteractionError;
use crate::style::Presentation;

/// Handles to the host page every behavior works against.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
}

impl Page {
    pub fn current() -> Result<Self, InteractionError> {
        let window = web_sys::window().ok_or(InteractionError::NoWindow)?;
        let document = window.document().ok_or(InteractionError::NoDocument)?;
        let body = document.body().ok_or(InteractionError::NoBody)?;
        Ok(Self { window, document, body })
    }

    /// First element matching `selector`, if any.
    pub fn query(&self, selector: &str) -> Result<Option<HtmlElement>, InteractionError> {
        let found = self.document.query_selector(selector)?;
        Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
    }

    /// Every element matching `selector`. Non-HTML nodes are skipped.
    pub fn query_all(&self, selector: &str) -> Result<Vec<HtmlElement>, InteractionError> {
        let list = self.document.query_selector_all(selector)?;
        let mut elements = Vec::with_capacity(list.length() as usize);
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
                elements.push(el);
            }
        }
        Ok(elements)
    }

    /// Vertical scroll offset in pixels, falling back to the root
    /// element's scroll top where `scrollY` is unavailable.
    pub fn scroll_offset(&self) -> f64 {
        match self.window.scroll_y() {
            Ok(offset) => offset,
            Err(_) => self
                .document
                .document_element()
                .map(|root| root.scroll_top() as f64)
                .unwrap_or(0.0),
        }
    }

    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }
}

/// Writes each declaration of `state` into the element's inline style.
pub fn apply_style<P: Presentation + ?Sized>(
    element: &HtmlElement,
    state: &P,
) -> Result<(), InteractionError> {
    let style = element.style();
    for (property, value) in state.declarations() {
        style.set_property(property, &value)?;
    }
    Ok(())
}

/// A registered event listener. The closure lives exactly as long as the
/// handle, and dropping the handle removes that same closure from the
/// target.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<Self, InteractionError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Same as [`Listener::new`] but tells the browser the handler never
    /// calls `preventDefault`.
    pub fn passive<F>(
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<Self, InteractionError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Creates a detached element of the given tag.
pub fn create(page: &Page, tag: &str) -> Result<HtmlElement, InteractionError> {
    let element: Element = page.document.create_element(tag)?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| InteractionError::Js(format!("<{}> is not an HTML element", tag)))
}
