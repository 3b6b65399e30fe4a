//! Non-fatal import diagnostics and the injected warning sink
//!
//! The core never logs directly: every duplicate, not-found, or ambiguous
//! import is handed to the sink the caller provided, and processing moves on
//! to the next specifier or file.

use std::path::PathBuf;

use sasswatch_parser::ResolveError;

/// A non-fatal problem found while ingesting one file's imports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportDiagnostic {
    /// The same edge was declared more than once in one file. The graph is
    /// unaffected beyond the first occurrence.
    #[error("duplicated @import in file '{}': '{}'", importer.display(), imported.display())]
    DuplicateImport { importer: PathBuf, imported: PathBuf },

    /// A specifier could not be resolved (not found, or ambiguous).
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Receives diagnostics during ingestion. `Display` on the diagnostic gives
/// the human-readable message text.
pub trait WarningSink: Send + Sync {
    fn warn(&self, diagnostic: ImportDiagnostic);
}

impl<F> WarningSink for F
where
    F: Fn(ImportDiagnostic) + Send + Sync,
{
    fn warn(&self, diagnostic: ImportDiagnostic) {
        self(diagnostic)
    }
}
