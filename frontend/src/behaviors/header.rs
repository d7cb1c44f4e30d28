use log::debug;

use crate::config::PageConfig;
use crate::dom::{apply_style, Listener, Page};
use crate::error::InteractionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Resting,
    Scrolled,
}

impl HeaderState {
    /// Scrolled strictly past `threshold`.
    pub fn for_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            HeaderState::Scrolled
        } else {
            HeaderState::Resting
        }
    }
}

/// Passive scroll listener restyling the site header. Only created when the
/// page has a header, so the handler never runs without a target.
pub struct HeaderToggle {
    _listener: Listener,
}

impl HeaderToggle {
    pub fn attach(page: &Page, config: &PageConfig) -> Result<Option<Self>, InteractionError> {
        let Some(header) = page.query(&config.header_selector)? else {
            return Ok(None);
        };

        let threshold = config.header_scroll_threshold;
        let handler_page = page.clone();
        let listener = Listener::passive(&page.window, "scroll", move |_| {
            let state = HeaderState::for_offset(handler_page.scroll_offset(), threshold);
            if let Err(e) = apply_style(&header, &state) {
                debug!("Header restyle failed: {}", e);
            }
        })?;
        Ok(Some(Self { _listener: listener }))
    }
}
