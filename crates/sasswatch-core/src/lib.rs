//! Sasswatch Core — bidirectional import graph and ingestion layer

pub mod diagnostics;
pub mod graph;
pub mod tree;


pub use diagnostics::{ImportDiagnostic, WarningSink};
pub use graph::{GraphSnapshot, ImportGraph};
pub use tree::ImportTree;
