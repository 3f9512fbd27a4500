//! Navigation state machine.
//!
//! The [`Navigator`] owns the one open [`ContainerHandle`], the current node
//! path, and the selection state over the current entry list. It is either
//! in the no-file-open state (no handle) or browsing (handle + path +
//! entries). Every navigation command rebuilds the entry list in full and
//! resets the selection; a failed command leaves the previous navigable
//! state untouched.

use std::path::PathBuf;

use crate::container::{expand_user, ContainerHandle, NodeInfo, NodeKind};
use crate::error::{HaloclineError, Result};
use crate::export;
use crate::listing::{self, Entry};
use crate::path as node_path;

/// Browser state: current file, path, entries and selection.
#[derive(Debug)]
pub struct Navigator {
    handle: Option<ContainerHandle>,
    path: String,
    entries: Vec<Entry>,
    selected: usize,
    scroll: usize,
}

impl Navigator {
    /// Create a navigator with no file open.
    pub fn new() -> Self {
        Self {
            handle: None,
            path: node_path::ROOT.to_string(),
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
        }
    }

    /// Whether a file is currently open.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// The open handle, if any.
    pub fn handle(&self) -> Option<&ContainerHandle> {
        self.handle.as_ref()
    }

    /// Current node path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries at the current level.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Selection index into the entry list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Scroll offset of the entry list.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// The currently selected entry, if any.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Open a container file, replacing any previously open one.
    ///
    /// A nonexistent path fails before the previous handle is touched. Once
    /// the old handle is dropped, a parse failure leaves the navigator with
    /// no open file (stale path/entries are kept for display only).
    pub fn open_file(&mut self, raw_path: &str) -> Result<()> {
        let expanded = expand_user(raw_path);
        if !expanded.exists() {
            return Err(HaloclineError::FileNotFound { path: expanded });
        }

        // At most one handle at a time: release the old file first.
        self.handle = None;

        let handle = ContainerHandle::open(raw_path)?;
        let entries = listing::build(&handle, node_path::ROOT)?;

        self.handle = Some(handle);
        self.path = node_path::ROOT.to_string();
        self.entries = entries;
        self.selected = 0;
        self.scroll = 0;
        Ok(())
    }

    /// Close the current file, returning to the no-file-open state.
    pub fn close(&mut self) {
        self.handle = None;
        self.path = node_path::ROOT.to_string();
        self.entries.clear();
        self.selected = 0;
        self.scroll = 0;
    }

    /// Move the selection by `delta`, clamped to the entry range (no wrap).
    pub fn select_delta(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }

    /// Jump the selection to the first entry.
    pub fn jump_top(&mut self) {
        self.selected = 0;
    }

    /// Jump the selection to the last entry.
    pub fn jump_bottom(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self.entries.len() - 1;
        }
    }

    /// Activate the selected entry.
    ///
    /// Parent entries move up, group entries move in, dataset entries are
    /// not enterable (no-op).
    pub fn activate_selected(&mut self) -> Result<()> {
        match self.selected_entry() {
            Some(Entry::Parent) => self.jump_to_parent(),
            Some(Entry::Group { name }) => {
                let target = node_path::child_of(&self.path, name);
                self.move_to(target)
            }
            Some(Entry::Dataset { .. }) | None => Ok(()),
        }
    }

    /// Move to the parent group; no-op at the root.
    pub fn jump_to_parent(&mut self) -> Result<()> {
        if node_path::is_root(&self.path) {
            return Ok(());
        }
        let target = node_path::parent_of(&self.path)?;
        self.move_to(target)
    }

    /// Keep the selection inside the visible window of `viewport_height` rows.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
        if self.selected >= self.scroll + viewport_height {
            self.scroll = self.selected - viewport_height + 1;
        }
    }

    /// Metadata snapshot of the selected dataset, for the info overlay.
    pub fn selected_dataset_info(&self) -> Result<NodeInfo> {
        let handle = self.require_handle()?;
        let entry = self
            .selected_entry()
            .ok_or_else(|| HaloclineError::NoSelection("No dataset selected".to_string()))?;

        match entry.kind() {
            Some(NodeKind::Dataset) => {
                let name = entry.name().expect("dataset entries are named");
                handle.resolve(&node_path::child_of(&self.path, name))
            }
            other => Err(HaloclineError::WrongKind {
                expected: "dataset",
                actual: kind_label(other),
            }),
        }
    }

    /// Node path of the group a subtree export would copy.
    ///
    /// A selected group entry wins; otherwise the group currently browsed
    /// (when not at the root) is used. At the root with nothing group-like
    /// selected there is no exportable source.
    pub fn subtree_source(&self) -> Result<String> {
        self.require_handle()?;

        if let Some(Entry::Group { name }) = self.selected_entry() {
            return Ok(node_path::child_of(&self.path, name));
        }
        if !node_path::is_root(&self.path) {
            return Ok(self.path.clone());
        }
        Err(HaloclineError::NoSelection(
            "No group selected and not inside a group".to_string(),
        ))
    }

    /// Node path of the dataset a table export would read.
    pub fn table_source(&self) -> Result<String> {
        self.require_handle()?;

        let entry = self
            .selected_entry()
            .ok_or_else(|| HaloclineError::NoSelection("No dataset selected".to_string()))?;
        match entry.kind() {
            Some(NodeKind::Dataset) => {
                let name = entry.name().expect("dataset entries are named");
                Ok(node_path::child_of(&self.path, name))
            }
            other => Err(HaloclineError::WrongKind {
                expected: "dataset",
                actual: kind_label(other),
            }),
        }
    }

    /// Export the group at `source` to a new container file. Returns the
    /// destination actually written.
    pub fn export_subtree(&self, source: &str, dest_raw: &str) -> Result<PathBuf> {
        let handle = self.require_handle()?;
        export::subtree::export(handle, source, dest_raw)
    }

    /// Export the dataset at `source` as a delimited table. Returns the
    /// destination actually written.
    pub fn export_table(&self, source: &str, dest_raw: &str) -> Result<PathBuf> {
        let handle = self.require_handle()?;
        export::table::export(handle, source, dest_raw)
    }

    fn require_handle(&self) -> Result<&ContainerHandle> {
        self.handle.as_ref().ok_or(HaloclineError::NoFileOpen)
    }

    /// Move to `target`, committing path and entries only when the listing
    /// rebuild succeeds.
    fn move_to(&mut self, target: String) -> Result<()> {
        let handle = self.require_handle()?;
        let entries = listing::build(handle, &target)?;

        self.path = target;
        self.entries = entries;
        self.selected = 0;
        self.scroll = 0;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            handle: None,
            path: node_path::ROOT.to_string(),
            entries,
            selected: 0,
            scroll: 0,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_label(kind: Option<NodeKind>) -> String {
    match kind {
        Some(k) => k.name().to_string(),
        None => "parent entry".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::Group {
                name: "g1".to_string(),
            },
            Entry::Dataset {
                name: "d1".to_string(),
                shape: vec![10],
                dtype: "f64".to_string(),
            },
            Entry::Dataset {
                name: "d2".to_string(),
                shape: vec![3, 4],
                dtype: "i32".to_string(),
            },
        ]
    }

    #[test]
    fn select_delta_clamps_at_boundaries() {
        let mut nav = Navigator::with_entries(sample_entries());
        nav.select_delta(-1);
        assert_eq!(nav.selected(), 0);

        nav.select_delta(1);
        nav.select_delta(1);
        assert_eq!(nav.selected(), 2);
        nav.select_delta(1);
        assert_eq!(nav.selected(), 2);
    }

    #[test]
    fn select_delta_on_empty_list_is_a_no_op() {
        let mut nav = Navigator::with_entries(Vec::new());
        nav.select_delta(1);
        nav.select_delta(-1);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn jump_top_and_bottom() {
        let mut nav = Navigator::with_entries(sample_entries());
        nav.jump_bottom();
        assert_eq!(nav.selected(), 2);
        nav.jump_top();
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn scroll_follows_selection() {
        let entries: Vec<Entry> = (0..20)
            .map(|i| Entry::Group {
                name: format!("g{}", i),
            })
            .collect();
        let mut nav = Navigator::with_entries(entries);

        for _ in 0..10 {
            nav.select_delta(1);
        }
        nav.adjust_scroll(5);
        assert_eq!(nav.scroll(), 6);

        nav.jump_top();
        nav.adjust_scroll(5);
        assert_eq!(nav.scroll(), 0);
    }

    #[test]
    fn no_open_file_is_reported() {
        let nav = Navigator::new();
        assert!(matches!(
            nav.table_source(),
            Err(HaloclineError::NoFileOpen)
        ));
        assert!(matches!(
            nav.subtree_source(),
            Err(HaloclineError::NoFileOpen)
        ));
    }
}
