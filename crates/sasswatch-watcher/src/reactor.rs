//! Change reactor: one lifecycle event in, one rebuild set out
//!
//! Each event is handled synchronously to completion; the reactor is the
//! single writer of the import graph, so callers must drive it from one
//! event loop.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use sasswatch_core::ImportTree;

/// Files that must be recompiled as the consequence of one event.
pub type RebuildSet = HashSet<PathBuf>;

/// Result of an unlink event: the rebuild set (the removed file excluded)
/// and, for `.scss` sources, the compiled sibling artifact the caller may
/// want to delete. Deleting it is the caller's side effect, not graph state.
#[derive(Debug)]
pub struct UnlinkOutcome {
    pub rebuild: RebuildSet,
    pub stale_artifact: Option<PathBuf>,
}

pub struct ChangeReactor {
    tree: ImportTree,
}

impl ChangeReactor {
    pub fn new(tree: ImportTree) -> Self {
        ChangeReactor { tree }
    }

    /// A file appeared: ingest it and rebuild it together with everything
    /// that imports it. Earlier not-found warnings naming this path are not
    /// retroactively healed; import lists are fixed at ingestion time.
    pub fn on_add(&mut self, file: &Path) -> Result<RebuildSet> {
        self.tree.ingest(file)?;
        let mut rebuild = self.tree.ancestors_of(file);
        rebuild.insert(file.to_path_buf());
        Ok(rebuild)
    }

    /// A file's content changed: its old import list is discarded wholesale,
    /// then it is treated exactly like an add.
    pub fn on_change(&mut self, file: &Path) -> Result<RebuildSet> {
        self.tree.drop_outgoing(file);
        self.on_add(file)
    }

    /// A file was deleted: its importers (computed before any mutation) need
    /// a rebuild, and the file is purged from the graph in both directions.
    pub fn on_unlink(&mut self, file: &Path) -> UnlinkOutcome {
        let rebuild = self.tree.ancestors_of(file);
        self.tree.drop_outgoing(file);
        self.tree.drop_incoming(file);

        let stale_artifact = file
            .extension()
            .is_some_and(|ext| ext == "scss")
            .then(|| file.with_extension("css"));

        UnlinkOutcome { rebuild, stale_artifact }
    }

    pub fn tree(&self) -> &ImportTree {
        &self.tree
    }
}
