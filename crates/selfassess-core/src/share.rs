//! Text content for sharing the survey.
//!
//! The share sheet or clipboard mechanism lives in the presentation layer;
//! this only supplies what to share.

use serde::Serialize;

pub const SHARE_TITLE: &str = "The Lebanese Indoctrination Self-Assessment";
pub const SHARE_TEXT: &str = "Take the Lebanese Indoctrination Self-Assessment — a reflective exercise for recognizing inherited beliefs vs. examined convictions.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareMessage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: url.into(),
        }
    }

    /// Text placed on the clipboard when no share sheet is available.
    pub fn clipboard_text(&self) -> String {
        if self.url.is_empty() {
            self.text.clone()
        } else {
            format!("{}\n\n{}", self.text, self.url)
        }
    }
}
