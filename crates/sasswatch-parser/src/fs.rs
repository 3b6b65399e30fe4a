//! Filesystem capability used by resolution and ingestion
//!
//! The resolver only needs existence checks and the ingestion layer only
//! needs whole-file reads, so both go through one small trait. Reads are
//! blocking: every lifecycle event is processed to completion before the
//! next one is accepted.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Access to stylesheet sources on disk.
pub trait StyleFs: Send + Sync {
    /// Whether a candidate file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a stylesheet's full text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl StyleFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. No filesystem access, so it works for paths that do
/// not exist (resolution candidates, unlinked files).
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
