use log::debug;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::config::PageConfig;
use crate::dom::{Listener, Page};
use crate::error::InteractionError;

/// What a click on an in-page link should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Bare `#`: leave the browser alone.
    BareRoot,
    /// No element carries the fragment id: default navigation.
    Unresolved,
    /// Cancel navigation and smooth-scroll to `top`.
    ScrollTo { top: f64 },
}

impl AnchorAction {
    pub fn prevents_default(&self) -> bool {
        matches!(self, AnchorAction::ScrollTo { .. })
    }
}

/// The id an in-page href points at, without the leading `#`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Decides the click outcome. `target_top` looks up the document-relative
/// top of the element with a given id.
pub fn resolve<F>(href: &str, allowance: f64, target_top: F) -> AnchorAction
where
    F: FnOnce(&str) -> Option<f64>,
{
    if href == "#" {
        return AnchorAction::BareRoot;
    }
    match fragment_id(href).and_then(target_top) {
        Some(top) => AnchorAction::ScrollTo { top: top - allowance },
        None => AnchorAction::Unresolved,
    }
}

/// Click interception on every `a[href^="#"]`.
pub struct AnchorScroll {
    _listeners: Vec<Listener>,
}

impl AnchorScroll {
    pub fn attach(page: &Page, config: &PageConfig) -> Result<Option<Self>, InteractionError> {
        let links = page.query_all(&config.anchor_selector)?;
        if links.is_empty() {
            return Ok(None);
        }

        let mut listeners = Vec::with_capacity(links.len());
        for link in links {
            let page = page.clone();
            let allowance = config.header_allowance;
            let anchor = link.clone();
            let listener = Listener::new(&link, "click", move |event| {
                let Some(href) = anchor.get_attribute("href") else {
                    return;
                };
                let action = resolve(&href, allowance, |id| {
                    page.document.get_element_by_id(id).map(|target| {
                        target.get_bounding_client_rect().top() + page.scroll_offset()
                    })
                });
                if let AnchorAction::ScrollTo { top } = action {
                    event.prevent_default();
                    let options = ScrollToOptions::new();
                    options.set_top(top);
                    options.set_behavior(ScrollBehavior::Smooth);
                    page.window.scroll_to_with_scroll_to_options(&options);
                }
            })?;
            listeners.push(listener);
        }
        debug!("Smooth scrolling wired to {} links", listeners.len());
        Ok(Some(Self { _listeners: listeners }))
    }
}
