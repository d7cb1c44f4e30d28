use std::cell::RefCell;

use log::{debug, error};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod schedule;
pub mod style;
pub mod behaviors {
    pub mod anchor;
    pub mod beans;
    pub mod fade;
    pub mod header;
    pub mod menu;
    pub mod nav;
    pub mod parallax;
    pub mod resize;
    pub mod reveal;
}

use config::PageConfig;
use controller::PageController;
use dom::Page;
use error::InteractionError;

thread_local! {
    static CONTROLLER: RefCell<Option<PageController>> = RefCell::new(None);
}

/// When the behaviors can be installed, given `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPhase {
    /// Still parsing: wait for `DOMContentLoaded`.
    AwaitContent,
    /// Parsed, but the window `load` event is still to come.
    Interactive,
    /// Everything loaded already; nothing left to wait for.
    Loaded,
}

pub fn start_phase(ready_state: &str) -> StartPhase {
    match ready_state {
        "loading" => StartPhase::AwaitContent,
        "complete" => StartPhase::Loaded,
        _ => StartPhase::Interactive,
    }
}

/// Starts the page behaviors, waiting for `DOMContentLoaded` when the
/// document is still parsing.
pub fn run() -> Result<(), InteractionError> {
    let window = web_sys::window().ok_or(InteractionError::NoWindow)?;
    let document = window.document().ok_or(InteractionError::NoDocument)?;

    match start_phase(&document.ready_state()) {
        StartPhase::AwaitContent => {
            let ready = Closure::once_into_js(move || {
                if let Err(e) = install(false) {
                    error!("Page interactions failed to start: {}", e);
                }
            });
            document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
            debug!("Waiting for DOMContentLoaded");
            Ok(())
        }
        StartPhase::Interactive => install(false),
        StartPhase::Loaded => install(true),
    }
}

fn install(already_loaded: bool) -> Result<(), InteractionError> {
    let page = Page::current()?;
    let config = PageConfig::from_body(&page.body);
    let controller = PageController::start(&page, &config, already_loaded);
    debug!("Parallax active: {}", controller.parallax_active());
    // Any previous controller is torn down once replaced.
    CONTROLLER.with(|slot| slot.borrow_mut().replace(controller));
    Ok(())
}

/// Detaches every behavior installed by [`run`].
#[wasm_bindgen]
pub fn teardown() {
    CONTROLLER.with(|slot| slot.borrow_mut().take());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_document_waits_for_content() {
        assert_eq!(start_phase("loading"), StartPhase::AwaitContent);
    }

    #[test]
    fn interactive_document_starts_and_awaits_load() {
        assert_eq!(start_phase("interactive"), StartPhase::Interactive);
    }

    #[test]
    fn complete_document_starts_fully_loaded() {
        assert_eq!(start_phase("complete"), StartPhase::Loaded);
    }
}
