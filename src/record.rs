//! Fixed-width record lines.

use std::fmt;

/// One encoded record, exactly `line_size` characters wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    text: String,
}

impl RecordLine {
    /// Space-pad or truncate `text` to exactly `line_size` characters.
    pub fn fit(mut text: String, line_size: usize) -> Self {
        let len = text.chars().count();
        if len < line_size {
            text.extend(std::iter::repeat_n(' ', line_size - len));
        } else if len > line_size {
            text = text.chars().take(line_size).collect();
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// Extract the field at 1-based `start` spanning `width` characters.
    ///
    /// Ranges past the end of the line are clipped.
    pub fn field(&self, start: usize, width: usize) -> &str {
        let skip = start.saturating_sub(1);
        let mut indices = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.text.len()));
        let Some(begin) = indices.nth(skip) else {
            return "";
        };
        let end = indices
            .nth(width.saturating_sub(1))
            .unwrap_or(self.text.len());
        if width == 0 { "" } else { &self.text[begin..end] }
    }
}

impl fmt::Display for RecordLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
