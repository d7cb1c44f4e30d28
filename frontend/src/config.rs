use log::Level;
use serde::Deserialize;

use crate::error::InteractionError;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Body attribute that may carry a JSON object overriding any of the
/// fields below.
pub const CONFIG_ATTRIBUTE: &str = "data-page-config";

/// Every selector and constant the page behaviors depend on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub reveal_selector: String,
    pub revealed_class: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub parallax_selector: String,
    pub parallax_rate: f64,
    pub parallax_scale: f64,
    /// Parallax only runs when the viewport is strictly wider than this.
    pub parallax_min_width: f64,

    pub anchor_selector: String,
    pub header_allowance: f64,

    pub nav_link_selector: String,
    pub index_document: String,

    pub header_selector: String,
    pub header_scroll_threshold: f64,

    pub bean_count: usize,

    pub menu_page_class: String,
    pub menu_item_selector: String,

    pub fade_delay_ms: u32,
    pub fade_transition: String,

    pub resize_debounce_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            reveal_selector: ".reveal".to_string(),
            revealed_class: "revealed".to_string(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            parallax_selector: ".hero__bg".to_string(),
            parallax_rate: -0.5,
            parallax_scale: 1.1,
            parallax_min_width: 768.0,
            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_allowance: 80.0,
            nav_link_selector: ".nav__link".to_string(),
            index_document: "index.html".to_string(),
            header_selector: ".site-header".to_string(),
            header_scroll_threshold: 100.0,
            bean_count: 5,
            menu_page_class: "page--menu".to_string(),
            menu_item_selector: ".menu-item".to_string(),
            fade_delay_ms: 100,
            fade_transition: "opacity 0.5s ease".to_string(),
            resize_debounce_ms: 250,
        }
    }
}

impl PageConfig {
    /// Parses an override blob. Keys that are absent keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, InteractionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the override attribute from the body, falling back to the
    /// defaults when it is absent or malformed.
    pub fn from_body(body: &web_sys::HtmlElement) -> Self {
        match body.get_attribute(CONFIG_ATTRIBUTE) {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", CONFIG_ATTRIBUTE, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
