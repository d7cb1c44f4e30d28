use log::debug;

use crate::config::PageConfig;
use crate::dom::{apply_style, Page};
use crate::error::InteractionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLinkState {
    Active,
}

/// Last path segment of `pathname`, or `index` when that segment is empty.
pub fn current_page(pathname: &str, index: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => index.to_string(),
    }
}

pub fn is_active(href: &str, current: &str, index: &str) -> bool {
    href == current || (href == index && (current.is_empty() || current == index))
}

/// Highlights the nav links pointing at the current page. Runs once per
/// load; links that do not match are left alone.
pub fn highlight(page: &Page, config: &PageConfig) -> Result<usize, InteractionError> {
    let pathname = page.window.location().pathname()?;
    let current = current_page(&pathname, &config.index_document);

    let mut highlighted = 0;
    for link in page.query_all(&config.nav_link_selector)? {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        if is_active(&href, &current, &config.index_document) {
            apply_style(&link, &NavLinkState::Active)?;
            highlighted += 1;
        }
    }
    debug!("Highlighted {} nav links for {}", highlighted, current);
    Ok(highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "index.html";

    #[test]
    fn root_path_resolves_to_index() {
        assert_eq!(current_page("/", INDEX), INDEX);
        assert_eq!(current_page("", INDEX), INDEX);
        assert_eq!(current_page("/site/", INDEX), INDEX);
    }

    #[test]
    fn last_segment_is_the_page() {
        assert_eq!(current_page("/menu.html", INDEX), "menu.html");
        assert_eq!(current_page("/cafe/about.html", INDEX), "about.html");
    }

    #[test]
    fn empty_and_explicit_index_both_match_index_link() {
        assert!(is_active(INDEX, &current_page("/", INDEX), INDEX));
        assert!(is_active(INDEX, &current_page("/index.html", INDEX), INDEX));
        assert!(is_active(INDEX, "", INDEX));
    }

    #[test]
    fn other_links_never_match() {
        let current = current_page("/menu.html", INDEX);
        assert!(is_active("menu.html", &current, INDEX));
        assert!(!is_active(INDEX, &current, INDEX));
        assert!(!is_active("about.html", &current, INDEX));
        assert!(!is_active("contact.html", &current_page("/", INDEX), INDEX));
    }
}
