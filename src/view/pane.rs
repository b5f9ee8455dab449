//! A rendered region of the page.

use crate::render::escape_angle_brackets;

/// Where a pane's viewport sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    #[default]
    Top,
    /// Pinned to the maximum extent, newest content visible.
    Bottom,
}

/// HTML content of one pane plus its scroll position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pane {
    html: String,
    placeholder: bool,
    scroll: ScrollPosition,
}

impl Pane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with a transient loading/error/empty message.
    pub fn show_placeholder(&mut self, text: &str) {
        self.html = format!(
            "<p class=\"placeholder\">{}</p>\n",
            escape_angle_brackets(text)
        );
        self.placeholder = true;
        self.scroll = ScrollPosition::Top;
    }

    /// Replace the content with real rendered markup.
    pub fn replace(&mut self, html: String) {
        self.html = html;
        self.placeholder = false;
        self.scroll = ScrollPosition::Top;
    }

    /// Append a fragment; a placeholder is dropped first.
    pub fn append(&mut self, fragment: &str) {
        if self.placeholder {
            self.html.clear();
            self.placeholder = false;
        }
        self.html.push_str(fragment);
    }

    pub fn clear(&mut self) {
        self.html.clear();
        self.placeholder = false;
        self.scroll = ScrollPosition::Top;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = ScrollPosition::Bottom;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }
}
