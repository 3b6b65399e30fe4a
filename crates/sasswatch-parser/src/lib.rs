//! Import directive parsing and specifier-to-file resolution for SCSS sources

pub mod fs;
pub mod parser;
pub mod resolver;

pub use fs::{OsFs, StyleFs, normalize};
pub use parser::parse_imports;
pub use resolver::{Resolution, ResolveError, Resolver};
