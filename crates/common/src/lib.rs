//! Shared types and utilities for objsync.
//!
//! This crate provides common functionality used across the objsync crates:
//! - Path normalization utilities for destination-key computation
//! - Shared path error types

pub mod error;
pub mod path_utils;

// Re-export commonly used items at crate root
pub use error::PathError;
pub use path_utils::{
    from_posix_path, join_key, lexical_normalize, relative_key, to_absolute, to_posix_path,
};
