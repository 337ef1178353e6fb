//! Selector model and DOM query generation.
//!
//! Selectors are plain CSS; the tag-qualified form (`p#quota-message`) is
//! preferred over bare ids so a selector also pins the element kind it
//! expects. Query strings are JavaScript expressions evaluated in the page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A selector for locating elements on the page under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    css: String,
}

impl Selector {
    /// Create a selector from a CSS string
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            css: selector.into(),
        }
    }

    /// Create a tag-qualified id selector, e.g. `id_of("button", "send")`
    /// yields `button#send`.
    #[must_use]
    pub fn id_of(tag: &str, id: &str) -> Self {
        Self {
            css: format!("{tag}#{id}"),
        }
    }

    /// The CSS source of this selector
    #[must_use]
    pub fn as_css(&self) -> &str {
        &self.css
    }

    /// JS expression: number of matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("document.querySelectorAll({:?}).length", self.css)
    }

    /// JS expression: trimmed text content of the `index`-th match, or null
    #[must_use]
    pub fn to_text_query(&self, index: usize) -> String {
        format!(
            "(() => {{ const el = document.querySelectorAll({:?})[{index}]; \
             return el ? el.textContent.trim() : null; }})()",
            self.css
        )
    }

    /// JS expression: value of attribute `name` on the `index`-th match, or null
    #[must_use]
    pub fn to_attr_query(&self, index: usize, name: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelectorAll({:?})[{index}]; \
             return el ? el.getAttribute({name:?}) : null; }})()",
            self.css
        )
    }

    /// JS statement: click the first match; evaluates to true when an
    /// element was found.
    #[must_use]
    pub fn to_click_script(&self) -> String {
        format!(
            "(() => {{ const el = document.querySelector({:?}); \
             if (!el) return false; el.click(); return true; }})()",
            self.css
        )
    }

    /// JS statement: set the value of the first match and fire the input and
    /// change events the page's own listeners expect.
    #[must_use]
    pub fn to_type_script(&self, text: &str) -> String {
        format!(
            "(() => {{ const el = document.querySelector({:?}); \
             if (!el) return false; el.value = {text:?}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()",
            self.css
        )
    }

    /// JS statement: select the option at `index` on the first matching
    /// `<select>` and fire a change event.
    #[must_use]
    pub fn to_select_option_script(&self, index: usize) -> String {
        format!(
            "(() => {{ const el = document.querySelector({:?}); \
             if (!el || el.options.length <= {index}) return false; \
             el.selectedIndex = {index}; \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()",
            self.css
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css)
    }
}

impl From<&str> for Selector {
    fn from(css: &str) -> Self {
        Self::css(css)
    }
}

impl From<String> for Selector {
    fn from(css: String) -> Self {
        Self::css(css)
    }
}
