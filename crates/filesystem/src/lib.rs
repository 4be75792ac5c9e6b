//! File selection for objsync.
//!
//! This crate resolves include/exclude glob patterns against the local
//! filesystem:
//! - `classify_include()` - Up-front include-pattern classification
//! - `select()` / `select_pattern()` - Pattern expansion into candidates
//! - `ExcludeFilter` - Base-name-aware exclude matching

pub mod error;
pub mod glob;
pub mod select;

// Re-export main types
pub use error::FileSystemError;
pub use glob::ExcludeFilter;
pub use select::{classify_include, select, select_pattern, IncludeKind};
