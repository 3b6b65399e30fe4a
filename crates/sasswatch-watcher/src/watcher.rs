//! Filesystem watcher implementation
//!
//! Thin adapter from raw `notify` events to the lifecycle events the change
//! reactor understands. Only stylesheet files pass through; event paths are
//! lexically normalized so they match graph identities.

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use sasswatch_parser::normalize;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Events emitted by the file watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Stylesheet created
    Added(PathBuf),
    /// Stylesheet content modified
    Modified(PathBuf),
    /// Stylesheet removed
    Removed(PathBuf),
}

/// Watches a directory tree for stylesheet lifecycle events
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
    root_path: PathBuf,
}

impl FileWatcher {
    /// Create a new file watcher for the given root path
    pub fn new(root_path: impl AsRef<Path>) -> Result<Self> {
        let root_path = root_path.as_ref().to_path_buf();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                match res {
                    Ok(event) => {
                        debug!("File system event: {:?}", event);
                        Self::handle_notify_event(event, &event_tx);
                    }
                    Err(e) => {
                        error!("File system watch error: {}", e);
                    }
                }
            })?;

        Ok(Self {
            watcher,
            event_rx,
            root_path,
        })
    }

    /// Translate one notify event into zero or more watch events
    fn handle_notify_event(event: notify::Event, event_tx: &mpsc::UnboundedSender<WatchEvent>) {
        let to_watch_event: fn(PathBuf) -> WatchEvent = match event.kind {
            notify::EventKind::Create(_) => WatchEvent::Added,
            notify::EventKind::Modify(_) => WatchEvent::Modified,
            notify::EventKind::Remove(_) => WatchEvent::Removed,
            _ => return,
        };
        for path in event.paths {
            if !is_stylesheet(&path) || should_ignore_path(&path) {
                continue;
            }
            if let Err(e) = event_tx.send(to_watch_event(normalize(&path))) {
                warn!("Failed to send watch event: {}", e);
            }
        }
    }

    /// Start watching the root directory recursively
    pub fn watch(&mut self) -> Result<()> {
        tracing::info!("Watching directory: {:?}", self.root_path);
        self.watcher.watch(&self.root_path, RecursiveMode::Recursive)?;
        Ok(())
    }

    /// Get the event receiver
    pub fn event_receiver(&mut self) -> &mut mpsc::UnboundedReceiver<WatchEvent> {
        &mut self.event_rx
    }

    /// The watched root
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

/// Check if a path is a stylesheet source we track
fn is_stylesheet(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "scss")
}

/// Check if a path should be ignored (e.g., .git/, node_modules/)
fn should_ignore_path(path: &Path) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| name == ".git" || name == "node_modules")
    })
}
