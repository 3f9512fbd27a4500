//! Line-input prompt for file paths.
//!
//! Open and export commands need a destination typed by the user; the
//! prompt collects it in a buffer shown on the status line.

/// What the collected input will be used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a container file to open.
    OpenFile,
    /// Destination for a subtree export of the group at `source`.
    ExportSubtree {
        /// Node path of the group to copy.
        source: String,
    },
    /// Destination for a table export of the dataset at `source`.
    ExportTable {
        /// Node path of the dataset to flatten.
        source: String,
    },
}

/// Prompt state.
#[derive(Debug, Default)]
pub struct PromptState {
    kind: Option<PromptKind>,
    label: String,
    buffer: String,
}

impl PromptState {
    /// Create an inactive prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the prompt is collecting input.
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Start collecting input for `kind`, shown under `label`.
    pub fn start(&mut self, kind: PromptKind, label: impl Into<String>) {
        self.kind = Some(kind);
        self.label = label.into();
        self.buffer.clear();
    }

    /// Add a character to the buffer.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Submit the prompt.
    ///
    /// An empty buffer cancels instead of submitting, matching the blank
    /// answer behavior of the input line.
    pub fn submit(&mut self) -> Option<(PromptKind, String)> {
        let kind = self.kind.take()?;
        self.label.clear();
        let text = std::mem::take(&mut self.buffer);
        if text.is_empty() {
            None
        } else {
            Some((kind, text))
        }
    }

    /// Cancel the prompt, discarding the buffer.
    pub fn cancel(&mut self) {
        self.kind = None;
        self.label.clear();
        self.buffer.clear();
    }

    /// Prompt label for display.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Collected input so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_returns_kind_and_text() {
        let mut prompt = PromptState::new();
        prompt.start(PromptKind::OpenFile, "Enter container file path: ");
        for c in "data.nc".chars() {
            prompt.input(c);
        }
        assert_eq!(
            prompt.submit(),
            Some((PromptKind::OpenFile, "data.nc".to_string()))
        );
        assert!(!prompt.is_active());
    }

    #[test]
    fn empty_submit_cancels() {
        let mut prompt = PromptState::new();
        prompt.start(PromptKind::OpenFile, "Enter container file path: ");
        assert_eq!(prompt.submit(), None);
        assert!(!prompt.is_active());
    }

    #[test]
    fn backspace_edits_the_buffer() {
        let mut prompt = PromptState::new();
        prompt.start(
            PromptKind::ExportTable {
                source: "/d1".to_string(),
            },
            "Export 'd1' to CSV file: ",
        );
        prompt.input('a');
        prompt.input('b');
        prompt.backspace();
        assert_eq!(prompt.buffer(), "a");
    }
}
