//! The shell-owned surface the navigator updates after each navigation

/// Title and viewport of whatever is displaying the views
pub trait Document: Send {
    /// Current title
    fn title(&self) -> &str;

    /// Replace the title
    fn set_title(&mut self, title: String);

    /// Reset the viewport to the top of the page
    fn scroll_to_top(&mut self);
}

/// In-memory document with no display attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessDocument {
    title: String,
    scroll_resets: usize,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an initial title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scroll_resets: 0,
        }
    }

    /// How many times the viewport was reset
    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets
    }
}

impl Document for HeadlessDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_resets += 1;
    }
}
