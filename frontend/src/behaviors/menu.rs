use log::debug;

use crate::config::PageConfig;
use crate::dom::{apply_style, Listener, Page};
use crate::error::InteractionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemState {
    Resting,
    Lifted,
}

impl MenuItemState {
    pub fn for_pointer(event: &str) -> Option<Self> {
        match event {
            "mouseenter" => Some(MenuItemState::Lifted),
            "mouseleave" => Some(MenuItemState::Resting),
            _ => None,
        }
    }
}

/// Hover lift for menu items, only on the menu page.
pub struct MenuHover {
    _listeners: Vec<Listener>,
}

impl MenuHover {
    pub fn is_menu_page(page: &Page, config: &PageConfig) -> bool {
        page.body.class_list().contains(&config.menu_page_class)
    }

    pub fn attach(page: &Page, config: &PageConfig) -> Result<Option<Self>, InteractionError> {
        if !Self::is_menu_page(page, config) {
            return Ok(None);
        }
        let items = page.query_all(&config.menu_item_selector)?;
        if items.is_empty() {
            return Ok(None);
        }

        let mut listeners = Vec::with_capacity(items.len() * 2);
        for item in items {
            for event in ["mouseenter", "mouseleave"] {
                let Some(state) = MenuItemState::for_pointer(event) else {
                    continue;
                };
                let target = item.clone();
                listeners.push(Listener::new(&item, event, move |_| {
                    let _ = apply_style(&target, &state);
                })?);
            }
        }
        debug!("Menu hover wired to {} items", listeners.len() / 2);
        Ok(Some(Self { _listeners: listeners }))
    }
}
