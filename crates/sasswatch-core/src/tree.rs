//! Ingestion layer: file content → parsed imports → graph edges
//!
//! `ImportTree` is the sole owner of the mutable `ImportGraph`. It reads file
//! content through the injected `StyleFs`, parses the import directives,
//! resolves each specifier, and records edges. Bad imports are downgraded to
//! warnings; only an underlying read failure aborts the current ingestion.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use sasswatch_parser::{Resolution, Resolver, StyleFs, parse_imports};

use crate::diagnostics::{ImportDiagnostic, WarningSink};
use crate::graph::ImportGraph;

pub struct ImportTree {
    graph: ImportGraph,
    resolver: Resolver,
    fs: Arc<dyn StyleFs>,
    sink: Arc<dyn WarningSink>,
}

impl ImportTree {
    /// `search_paths` are consulted, in order, after each importing file's
    /// own directory.
    pub fn new(fs: Arc<dyn StyleFs>, search_paths: Vec<PathBuf>, sink: Arc<dyn WarningSink>) -> Self {
        ImportTree {
            graph: ImportGraph::new(),
            resolver: Resolver::new(Arc::clone(&fs), search_paths),
            fs,
            sink,
        }
    }

    /// Read, parse, and resolve one file's imports, recording an edge per
    /// successful resolution. Non-SCSS files carry no directives we track.
    /// A single bad import never aborts the rest of the file; an unreadable
    /// file does.
    pub fn ingest(&mut self, file: &Path) -> Result<()> {
        if !file.extension().is_some_and(|ext| ext == "scss") {
            return Ok(());
        }
        let content = self
            .fs
            .read_to_string(file)
            .with_context(|| format!("failed to read '{}'", file.display()))?;

        for specifier in parse_imports(&content) {
            match self.resolver.resolve(file, &specifier) {
                Ok(Resolution::File(imported)) => {
                    if !self.graph.add_edge(file, &imported) {
                        self.sink.warn(ImportDiagnostic::DuplicateImport {
                            importer: file.to_path_buf(),
                            imported,
                        });
                    }
                }
                Ok(Resolution::CssPassthrough) => {}
                Err(error) => self.sink.warn(ImportDiagnostic::Resolve(error)),
            }
        }
        Ok(())
    }

    /// Ingest every file of the initial corpus scan, in iteration order.
    pub fn build<I>(&mut self, files: I) -> Result<()>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for file in files {
            self.ingest(&file)?;
        }
        Ok(())
    }

    /// All files that directly or transitively import `file`.
    pub fn ancestors_of(&self, file: &Path) -> HashSet<PathBuf> {
        self.graph.ancestors_of(file)
    }

    /// Discard `file`'s recorded import list (before re-ingesting it, or when
    /// it is deleted).
    pub fn drop_outgoing(&mut self, file: &Path) {
        self.graph.drop_outgoing(file);
    }

    /// Remove `file` as an import target (when it is deleted).
    pub fn drop_incoming(&mut self, file: &Path) {
        self.graph.drop_incoming(file);
    }

    /// Read-only view of the graph.
    pub fn graph(&self) -> &ImportGraph {
        &self.graph
    }
}
