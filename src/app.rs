//! Application state and logic.
//!
//! [`App`] glues the navigation core to the UI: it owns the [`Navigator`],
//! the input prompt, the info overlay content and the status line, and
//! translates every command result into a status message. The core never
//! renders; failures never leave this layer as anything but a message.

use crate::container::NodeInfo;
use crate::error::Result;
use crate::navigator::Navigator;
use crate::path as node_path;
use crate::prompt::{PromptKind, PromptState};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Navigation core: open file, current path, entries, selection.
    pub navigator: Navigator,
    /// Path input prompt.
    pub prompt: PromptState,
    /// Info overlay content, when visible.
    pub info: Option<NodeInfo>,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
}

impl App {
    /// Create a new application instance, optionally opening a startup file.
    ///
    /// A startup file that fails to open is reported in the status line and
    /// the user continues without a file.
    pub fn new(startup_file: Option<String>) -> Self {
        let mut app = Self {
            navigator: Navigator::new(),
            prompt: PromptState::new(),
            info: None,
            status: "No file opened - press 'o' to open a file".to_string(),
            theme: Theme::GruvboxDark,
        };

        if let Some(path) = startup_file {
            app.open_file(&path);
        }

        app
    }

    /// Open a container file and report the outcome.
    pub fn open_file(&mut self, raw_path: &str) {
        match self.navigator.open_file(raw_path) {
            Ok(()) => {
                let name = self
                    .navigator
                    .handle()
                    .map(|h| h.fs_path().display().to_string())
                    .unwrap_or_default();
                self.status = format!("Opened: {}", name);
            }
            Err(e) => {
                tracing::error!("Error opening file: {}", e);
                self.status = format!("Error opening file: {}", e);
            }
        }
    }

    /// Move the selection by `delta`.
    pub fn move_selection(&mut self, delta: isize) {
        self.navigator.select_delta(delta);
    }

    /// Activate the selected entry.
    pub fn activate(&mut self) {
        self.report(|nav| nav.activate_selected());
    }

    /// Move to the parent group.
    pub fn go_to_parent(&mut self) {
        self.report(|nav| nav.jump_to_parent());
    }

    /// Jump the selection to the top.
    pub fn jump_top(&mut self) {
        self.navigator.jump_top();
    }

    /// Jump the selection to the bottom.
    pub fn jump_bottom(&mut self) {
        self.navigator.jump_bottom();
    }

    /// Start the open-file prompt.
    pub fn start_open_prompt(&mut self) {
        self.prompt
            .start(PromptKind::OpenFile, "Enter container file path: ");
    }

    /// Start the subtree export prompt, if an exportable group exists.
    pub fn start_subtree_export_prompt(&mut self) {
        match self.navigator.subtree_source() {
            Ok(source) => {
                let name = node_path::leaf_name(&source).unwrap_or("/").to_string();
                self.prompt.start(
                    PromptKind::ExportSubtree { source },
                    format!("Export '{}' to file: ", name),
                );
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Start the table export prompt, if a dataset is selected.
    pub fn start_table_export_prompt(&mut self) {
        match self.navigator.table_source() {
            Ok(source) => {
                let name = node_path::leaf_name(&source).unwrap_or("/").to_string();
                self.prompt.start(
                    PromptKind::ExportTable { source },
                    format!("Export '{}' to CSV file: ", name),
                );
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Submit the active prompt and run the pending command.
    ///
    /// A blank answer closes the prompt without running anything and leaves
    /// the status line untouched.
    pub fn submit_prompt(&mut self) {
        let Some((kind, text)) = self.prompt.submit() else {
            return;
        };

        match kind {
            PromptKind::OpenFile => self.open_file(&text),
            PromptKind::ExportSubtree { source } => {
                match self.navigator.export_subtree(&source, &text) {
                    Ok(dest) => {
                        self.status = format!("Successfully exported to: {}", dest.display());
                    }
                    Err(e) => self.status = format!("Export failed: {}", e),
                }
            }
            PromptKind::ExportTable { source } => {
                match self.navigator.export_table(&source, &text) {
                    Ok(dest) => {
                        self.status = format!("Successfully exported to: {}", dest.display());
                    }
                    Err(e) => self.status = format!("CSV export failed: {}", e),
                }
            }
        }
    }

    /// Show the info overlay for the selected dataset.
    pub fn show_info(&mut self) {
        match self.navigator.selected_dataset_info() {
            Ok(info) => self.info = Some(info),
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Close any open overlay and cancel the prompt.
    pub fn close_overlay(&mut self) {
        self.info = None;
        self.prompt.cancel();
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    fn report(&mut self, op: impl FnOnce(&mut Navigator) -> Result<()>) {
        if let Err(e) = op(&mut self.navigator) {
            self.status = e.to_string();
        }
    }
}
