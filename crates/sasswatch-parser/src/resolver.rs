//! Specifier-to-file resolution
//!
//! Turns one raw import specifier plus the importing file's location and the
//! configured include paths into a single existing stylesheet file. Candidate
//! parents are tried in order (the importing file's own directory first);
//! within a parent a specifier may match the literal path, an appended
//! stylesheet extension, or the partial-file variant with a leading
//! underscore. Exactly one existing candidate wins; more than one is an
//! ambiguity that stops the whole search.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fs::{StyleFs, normalize};

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier names this existing stylesheet file.
    File(PathBuf),
    /// `.css` imports are emitted literally by the compiler, nothing to track.
    CssPassthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("could not resolve '{specifier}' from file '{}': file not found", importer.display())]
    NotFound { specifier: String, importer: PathBuf },

    #[error(
        "could not resolve ambiguous '{specifier}' from file '{}', following candidates exist:\n- {}",
        importer.display(),
        candidates.iter().map(|c| c.display().to_string()).collect::<Vec<_>>().join("\n- ")
    )]
    Ambiguous {
        specifier: String,
        importer: PathBuf,
        candidates: Vec<PathBuf>,
    },
}

/// Resolves import specifiers against the filesystem.
pub struct Resolver {
    fs: Arc<dyn StyleFs>,
    search_paths: Vec<PathBuf>,
}

impl Resolver {
    /// `search_paths` are consulted after the importing file's own directory,
    /// in declared order.
    pub fn new(fs: Arc<dyn StyleFs>, search_paths: Vec<PathBuf>) -> Self {
        Resolver { fs, search_paths }
    }

    /// Resolve one specifier for `importer`. A resolved path is lexically
    /// normalized so it can serve as a graph identity.
    pub fn resolve(&self, importer: &Path, specifier: &str) -> Result<Resolution, ResolveError> {
        if specifier.ends_with(".css") {
            return Ok(Resolution::CssPassthrough);
        }

        let parents = importer
            .parent()
            .into_iter()
            .map(Path::to_path_buf)
            .chain(self.search_paths.iter().cloned());

        for parent in parents {
            let target = normalize(&parent.join(specifier));
            let candidates = if target.extension().is_some_and(|ext| ext == "scss") {
                candidates_with_extension(&target)
            } else {
                candidates_without_extension(&target)
            };

            let mut existing: Vec<PathBuf> = candidates
                .into_iter()
                .filter(|candidate| self.fs.exists(candidate))
                .collect();

            match existing.len() {
                0 => continue,
                1 => return Ok(Resolution::File(existing.remove(0))),
                // ambiguity is final: later parents are not consulted
                _ => {
                    return Err(ResolveError::Ambiguous {
                        specifier: specifier.to_string(),
                        importer: importer.to_path_buf(),
                        candidates: existing,
                    });
                }
            }
        }

        Err(ResolveError::NotFound {
            specifier: specifier.to_string(),
            importer: importer.to_path_buf(),
        })
    }
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('_'))
}

/// Candidates for a specifier already carrying the `.scss` extension: the
/// literal path, plus the partial variant unless it is already a partial.
fn candidates_with_extension(target: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![target.to_path_buf()];
    if !is_partial(target) {
        if let Some(name) = target.file_name().and_then(|name| name.to_str()) {
            candidates.push(target.with_file_name(format!("_{name}")));
        }
    }
    candidates
}

/// Candidates for an extension-less specifier: `.scss`, `.css`, plus the
/// `.scss` partial variant unless it is already a partial.
fn candidates_without_extension(target: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![append_extension(target, ".scss"), append_extension(target, ".css")];
    if !is_partial(target) {
        if let Some(name) = target.file_name().and_then(|name| name.to_str()) {
            candidates.push(target.with_file_name(format!("_{name}.scss")));
        }
    }
    candidates
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(extension);
    PathBuf::from(raw)
}
