//! Sasswatch Watcher — filesystem events in, rebuild sets out

pub mod reactor;
pub mod watcher;

pub use reactor::{ChangeReactor, RebuildSet, UnlinkOutcome};
pub use watcher::{FileWatcher, WatchEvent};
