use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::PageConfig;
use crate::dom::{apply_style, Listener, Page};
use crate::error::InteractionError;
use crate::schedule::FrameThrottle;

/// Transform applied to the hero background for a given scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxTransform {
    pub translate_y: f64,
    pub scale: f64,
}

impl ParallaxTransform {
    pub fn for_offset(scroll_offset: f64, rate: f64, scale: f64) -> Self {
        Self {
            translate_y: scroll_offset * rate,
            scale,
        }
    }
}

/// Whether the parallax effect should run at a given viewport width.
pub fn enabled_for_width(width: f64, min_width: f64) -> bool {
    width > min_width
}

/// Anything the resize handler can switch on and off.
pub trait ParallaxControl {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
}

/// Frame-coalesced parallax on the hero background. The scroll listener is
/// held as a stored handle so detaching always removes the exact closure
/// that was registered.
pub struct Parallax {
    page: Page,
    throttle: Rc<FrameThrottle>,
    on_frame: Rc<Closure<dyn FnMut(f64)>>,
    listener: Option<Listener>,
}

impl Parallax {
    /// Looks up the hero background once. Returns `None` when the page has
    /// none, in which case the whole effect is skipped for the page.
    pub fn setup(page: &Page, config: &PageConfig) -> Result<Option<Self>, InteractionError> {
        let Some(target) = page.query(&config.parallax_selector)? else {
            return Ok(None);
        };

        let throttle = Rc::new(FrameThrottle::new());
        let on_frame = {
            let page = page.clone();
            let throttle = Rc::clone(&throttle);
            let (rate, scale) = (config.parallax_rate, config.parallax_scale);
            Closure::wrap(Box::new(move |_timestamp: f64| {
                let transform = ParallaxTransform::for_offset(page.scroll_offset(), rate, scale);
                update(&target, &transform);
                throttle.finish();
            }) as Box<dyn FnMut(f64)>)
        };

        Ok(Some(Self {
            page: page.clone(),
            throttle,
            on_frame: Rc::new(on_frame),
            listener: None,
        }))
    }

    /// Registers the scroll listener. Attaching twice is a no-op.
    pub fn attach(&mut self) -> Result<(), InteractionError> {
        if self.listener.is_some() {
            return Ok(());
        }
        let window = self.page.window.clone();
        let throttle = Rc::clone(&self.throttle);
        let on_frame = Rc::clone(&self.on_frame);
        let listener = Listener::new(&self.page.window, "scroll", move |_| {
            if throttle.try_begin() {
                match window.request_animation_frame((*on_frame).as_ref().unchecked_ref()) {
                    Ok(id) => throttle.record(id),
                    Err(e) => {
                        debug!("Parallax frame request failed: {:?}", e);
                        throttle.finish();
                    }
                }
            }
        })?;
        self.listener = Some(listener);
        debug!("Parallax attached");
        Ok(())
    }

    pub fn detach(&mut self) {
        if self.listener.take().is_some() {
            debug!("Parallax detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }
}

impl Drop for Parallax {
    fn drop(&mut self) {
        // The frame closure dies with us; a frame still queued must not run.
        if let Some(id) = self.throttle.take_pending() {
            let _ = self.page.window.cancel_animation_frame(id);
        }
    }
}

impl ParallaxControl for Parallax {
    fn enable(&mut self) {
        if let Err(e) = self.attach() {
            warn!("Parallax could not attach: {}", e);
        }
    }

    fn disable(&mut self) {
        self.detach();
    }

    fn is_enabled(&self) -> bool {
        self.is_attached()
    }
}

fn update(target: &HtmlElement, transform: &ParallaxTransform) {
    if let Err(e) = apply_style(target, transform) {
        debug!("Parallax update failed: {}", e);
    }
}
