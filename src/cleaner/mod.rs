//! Cleaner module - strips `console.log` statements from a project tree
//!
//! This module walks a directory depth-first, skips excluded directory names,
//! and rewrites JavaScript, TypeScript, Vue, Svelte and Rust sources with every
//! single-line `console.log(...)` statement removed.

pub mod error;
pub mod exclude;
pub mod fs;
pub mod patterns;
pub mod tree;

pub use error::CleanError;
pub use exclude::{ExclusionSet, DEFAULT_EXCLUDES};
pub use fs::{DirEntry, EntryKind, FileSystem, LocalFs, MemoryFs};
pub use patterns::{is_source_file, strip_console_logs, Removal, SOURCE_EXTENSIONS};
pub use tree::{clean, CleanReport, TreeCleaner};
