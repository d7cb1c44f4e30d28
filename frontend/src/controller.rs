use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::behaviors::anchor::AnchorScroll;
use crate::behaviors::beans::Beans;
use crate::behaviors::fade::FadeIn;
use crate::behaviors::header::HeaderToggle;
use crate::behaviors::menu::MenuHover;
use crate::behaviors::nav;
use crate::behaviors::parallax::{enabled_for_width, Parallax};
use crate::behaviors::resize::ResizeWatcher;
use crate::behaviors::reveal::Reveal;
use crate::config::PageConfig;
use crate::dom::Page;
use crate::error::InteractionError;

/// Owns every page behavior for the lifetime of one page (or one test).
/// Each behavior is attached independently; a missing target or a failed
/// DOM call only switches off that one behavior.
pub struct PageController {
    reveal: Option<Reveal>,
    parallax: Option<Rc<RefCell<Parallax>>>,
    anchors: Option<AnchorScroll>,
    header: Option<HeaderToggle>,
    beans: Option<Beans>,
    menu: Option<MenuHover>,
    fade: Option<FadeIn>,
    resize: Option<ResizeWatcher>,
}

fn settle_behavior<T>(name: &str, result: Result<Option<T>, InteractionError>) -> Option<T> {
    match result {
        Ok(Some(behavior)) => {
            debug!("{} attached", name);
            Some(behavior)
        }
        Ok(None) => {
            debug!("{}: no target on this page", name);
            None
        }
        Err(e) => {
            warn!("{} disabled: {}", name, e);
            None
        }
    }
}

impl PageController {
    /// Attaches every behavior against `page`. `already_loaded` tells the
    /// fade-in whether the window `load` event has fired already.
    pub fn start(page: &Page, config: &PageConfig, already_loaded: bool) -> Self {
        let reveal = settle_behavior("Reveal", Reveal::attach(page, config));

        let parallax = settle_behavior("Parallax target", Parallax::setup(page, config))
            .map(|p| Rc::new(RefCell::new(p)));
        if let Some(parallax) = &parallax {
            if enabled_for_width(page.viewport_width(), config.parallax_min_width) {
                if let Err(e) = parallax.borrow_mut().attach() {
                    warn!("Parallax disabled: {}", e);
                }
            } else {
                debug!("Parallax off: viewport too narrow");
            }
        }

        let anchors = settle_behavior("Smooth scrolling", AnchorScroll::attach(page, config));

        match nav::highlight(page, config) {
            Ok(_) => {}
            Err(e) => warn!("Nav highlight skipped: {}", e),
        }

        let header = settle_behavior("Header toggle", HeaderToggle::attach(page, config));

        let beans = settle_behavior(
            "Coffee beans",
            Beans::attach(page, config, &mut rand::thread_rng()).map(Some),
        );

        let menu = settle_behavior("Menu hover", MenuHover::attach(page, config));

        let fade = settle_behavior(
            "Fade-in",
            FadeIn::attach(page, config, already_loaded).map(Some),
        );

        let resize = match &parallax {
            Some(parallax) => settle_behavior(
                "Resize watcher",
                ResizeWatcher::attach(page, config, Rc::clone(parallax)).map(Some),
            ),
            None => None,
        };

        info!("Page interactions started");
        Self {
            reveal,
            parallax,
            anchors,
            header,
            beans,
            menu,
            fade,
            resize,
        }
    }

    pub fn parallax_active(&self) -> bool {
        self.parallax
            .as_ref()
            .map(|p| p.borrow().is_attached())
            .unwrap_or(false)
    }

    /// Detaches every behavior: listeners are removed, pending timers are
    /// cancelled and injected elements are taken out of the page.
    pub fn teardown(&mut self) {
        // Resize first so no settle can re-attach parallax mid-teardown.
        drop(self.resize.take());
        if let Some(parallax) = self.parallax.take() {
            parallax.borrow_mut().detach();
        }
        drop(self.reveal.take());
        drop(self.anchors.take());
        drop(self.header.take());
        drop(self.beans.take());
        drop(self.menu.take());
        drop(self.fade.take());
        debug!("Page interactions torn down");
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.teardown();
    }
}
