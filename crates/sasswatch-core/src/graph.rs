//! The bidirectional import graph
//!
//! Two mirrored adjacency maps keyed by canonical absolute path: who a file
//! imports, and who imports it. Every mutation maintains the mirror
//! invariant (`b ∈ desc[a]` iff `a ∈ asc[b]`) and prunes keys whose sets
//! become empty, so absence of a key always means "no edges".

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Directed import relations between stylesheet files.
#[derive(Debug, Default)]
pub struct ImportGraph {
    /// importer → files it directly imports
    desc: HashMap<PathBuf, HashSet<PathBuf>>,
    /// imported → files that directly import it
    asc: HashMap<PathBuf, HashSet<PathBuf>>,
}

/// Serializable view of the graph, importer → sorted imports.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot {
    pub imports: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the edge `importer → imported` into both maps. Returns `false`
    /// without mutating if the edge already exists.
    pub fn add_edge(&mut self, importer: &Path, imported: &Path) -> bool {
        if self
            .desc
            .get(importer)
            .is_some_and(|imports| imports.contains(imported))
        {
            return false;
        }
        self.desc
            .entry(importer.to_path_buf())
            .or_default()
            .insert(imported.to_path_buf());
        self.asc
            .entry(imported.to_path_buf())
            .or_default()
            .insert(importer.to_path_buf());
        true
    }

    /// Files `file` directly imports.
    pub fn imports_of(&self, file: &Path) -> Option<&HashSet<PathBuf>> {
        self.desc.get(file)
    }

    /// Files that directly import `file`.
    pub fn importers_of(&self, file: &Path) -> Option<&HashSet<PathBuf>> {
        self.asc.get(file)
    }

    /// All files that directly or transitively import `file`. Breadth-first
    /// over the reverse adjacency with an explicit visited set; the visited
    /// set doubles as cycle protection, since import graphs may be cyclic.
    pub fn ancestors_of(&self, file: &Path) -> HashSet<PathBuf> {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut queue: VecDeque<&Path> = VecDeque::new();
        queue.push_back(file);

        while let Some(current) = queue.pop_front() {
            if let Some(importers) = self.asc.get(current) {
                for importer in importers {
                    if importer.as_path() != file && visited.insert(importer.clone()) {
                        queue.push_back(importer.as_path());
                    }
                }
            }
        }

        visited
    }

    /// Remove every edge where `file` is the importer, pruning now-empty
    /// reverse entries.
    pub fn drop_outgoing(&mut self, file: &Path) {
        let Some(imports) = self.desc.remove(file) else {
            return;
        };
        for imported in imports {
            if let Some(importers) = self.asc.get_mut(&imported) {
                importers.remove(file);
                if importers.is_empty() {
                    self.asc.remove(&imported);
                }
            }
        }
    }

    /// Remove every edge where `file` is the imported target, removing `file`
    /// as a key on the imported side entirely.
    pub fn drop_incoming(&mut self, file: &Path) {
        let Some(importers) = self.asc.remove(file) else {
            return;
        };
        for importer in importers {
            if let Some(imports) = self.desc.get_mut(&importer) {
                imports.remove(file);
                if imports.is_empty() {
                    self.desc.remove(&importer);
                }
            }
        }
    }

    /// Whether `file` participates in any edge, in either direction.
    pub fn contains(&self, file: &Path) -> bool {
        self.desc.contains_key(file) || self.asc.contains_key(file)
    }

    /// Number of distinct files participating in at least one edge.
    pub fn file_count(&self) -> usize {
        let mut files: HashSet<&Path> = self.desc.keys().map(PathBuf::as_path).collect();
        files.extend(self.asc.keys().map(PathBuf::as_path));
        files.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.desc.values().map(HashSet::len).sum()
    }

    /// Sorted, serializable copy of the forward adjacency.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            imports: self
                .desc
                .iter()
                .map(|(importer, imports)| {
                    (importer.clone(), imports.iter().cloned().collect())
                })
                .collect(),
        }
    }

    /// Check the mirror invariant. Test support.
    #[doc(hidden)]
    pub fn is_mirror_consistent(&self) -> bool {
        let forward_ok = self.desc.iter().all(|(importer, imports)| {
            !imports.is_empty()
                && imports.iter().all(|imported| {
                    self.asc
                        .get(imported)
                        .is_some_and(|importers| importers.contains(importer))
                })
        });
        let reverse_ok = self.asc.iter().all(|(imported, importers)| {
            !importers.is_empty()
                && importers.iter().all(|importer| {
                    self.desc
                        .get(importer)
                        .is_some_and(|imports| imports.contains(imported))
                })
        });
        forward_ok && reverse_ok
    }
}
