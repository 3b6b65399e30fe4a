//! CLI command implementations

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use sasswatch_core::{ImportDiagnostic, ImportTree, WarningSink};
use sasswatch_parser::{OsFs, normalize};
use sasswatch_watcher::{ChangeReactor, FileWatcher, RebuildSet, WatchEvent};

pub async fn watch(
    root: PathBuf,
    globs: Vec<String>,
    include_paths: Vec<PathBuf>,
    delete_css: bool,
) -> Result<()> {
    let root = absolute_root(&root)?;
    let tree = build_tree(&root, &globs, include_paths)?;
    tracing::info!(
        "Tracking {} files, {} imports",
        tree.graph().file_count(),
        tree.graph().edge_count()
    );

    let mut reactor = ChangeReactor::new(tree);
    let mut watcher = FileWatcher::new(&root)?;
    watcher.watch()?;

    // one event at a time: the reactor is the single writer of the graph
    while let Some(event) = watcher.event_receiver().recv().await {
        tracing::debug!("Processing watch event: {:?}", event);
        match event {
            WatchEvent::Added(path) => {
                tracing::info!("File added: {}", path.display());
                emit_rebuild_set(reactor.on_add(&path)?);
            }
            WatchEvent::Modified(path) => {
                tracing::info!("File modified: {}", path.display());
                emit_rebuild_set(reactor.on_change(&path)?);
            }
            WatchEvent::Removed(path) => {
                tracing::info!("File removed: {}", path.display());
                let outcome = reactor.on_unlink(&path);
                if delete_css {
                    remove_stale_artifact(outcome.stale_artifact.as_deref());
                }
                emit_rebuild_set(outcome.rebuild);
            }
        }
    }

    Ok(())
}

pub fn scan(root: PathBuf, globs: Vec<String>, include_paths: Vec<PathBuf>, json: bool) -> Result<()> {
    let root = absolute_root(&root)?;
    let tree = build_tree(&root, &globs, include_paths)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tree.graph().snapshot())?);
    } else {
        tracing::info!(
            "Tracking {} files, {} imports",
            tree.graph().file_count(),
            tree.graph().edge_count()
        );
    }
    Ok(())
}

/// Enumerate the corpus and ingest it into a fresh tree. Warnings go to the
/// log; only unreadable files abort the scan.
fn build_tree(root: &Path, globs: &[String], include_paths: Vec<PathBuf>) -> Result<ImportTree> {
    let include_paths = include_paths
        .into_iter()
        .map(|path| normalize(&root.join(path)))
        .collect();
    let sink: Arc<dyn WarningSink> = Arc::new(|diagnostic: ImportDiagnostic| {
        tracing::warn!("{diagnostic}");
    });

    let files = enumerate_files(root, globs)?;
    tracing::debug!("Initial scan found {} stylesheet files", files.len());

    let mut tree = ImportTree::new(Arc::new(OsFs), include_paths, sink);
    tree.build(files)?;
    Ok(tree)
}

/// Walk the root directory and collect every file matching the globs, in
/// deterministic (sorted) order.
fn enumerate_files(root: &Path, globs: &[String]) -> Result<BTreeSet<PathBuf>> {
    let globs = compile_globs(globs)?;
    let mut files = BTreeSet::new();

    for entry in ignore::WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot read entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_some_and(|kind| kind.is_file()) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if globs.is_match(relative) {
            files.insert(normalize(path));
        }
    }

    Ok(files)
}

fn compile_globs(globs: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in globs {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob '{pattern}'"))?);
    }
    Ok(builder.build()?)
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    Ok(normalize(&cwd.join(root)))
}

/// Hand the rebuild set to the downstream pipeline: one absolute path per
/// stdout line, sorted for determinism.
fn emit_rebuild_set(rebuild: RebuildSet) {
    let mut files: Vec<PathBuf> = rebuild.into_iter().collect();
    files.sort();
    tracing::info!("{} file(s) to rebuild", files.len());
    for file in files {
        println!("{}", file.display());
    }
}

/// Unlink side effect: drop the compiled artifact left behind by a deleted
/// source, if it is actually there.
fn remove_stale_artifact(artifact: Option<&Path>) {
    let Some(artifact) = artifact else {
        return;
    };
    if artifact.is_file() {
        tracing::info!("Removing stale artifact: {}", artifact.display());
        if let Err(e) = std::fs::remove_file(artifact) {
            tracing::warn!("Cannot remove '{}': {}", artifact.display(), e);
        }
    }
}
