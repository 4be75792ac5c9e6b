//! Path normalization utilities for destination-key computation.
//!
//! Destination keys are always POSIX format (forward slashes), relative to
//! the source root, and prefix-joined. Local paths keep OS-native
//! separators until they are turned into keys.

use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Convert a path to absolute without resolving symlinks.
///
/// # Arguments
/// * `path` - Path to convert (relative or absolute)
///
/// # Returns
/// Absolute path, joining with current directory if relative.
///
/// # Errors
/// Returns error if current directory cannot be determined.
pub fn to_absolute(path: &Path) -> Result<PathBuf, PathError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        std::env::current_dir()
            .map(|cwd: PathBuf| cwd.join(path))
            .map_err(|e: std::io::Error| PathError::from_io(path.display().to_string(), e))
    }
}

/// Lexical path normalization without filesystem access.
///
/// Removes `.` components and resolves `..` components lexically.
/// Does not access the filesystem or resolve symlinks.
///
/// # Arguments
/// * `path` - Path to normalize
///
/// # Returns
/// Normalized path with `.` and `..` resolved lexically.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => { /* skip . */ }
            Component::ParentDir => {
                // Pop if we can and it's not a ParentDir or RootDir
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::ParentDir) | Some(Component::RootDir)
                    )
                {
                    components.pop();
                } else {
                    components.push(component);
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Compute the root-relative destination key for a local path.
///
/// This function:
/// 1. Converts to absolute path WITHOUT resolving symlinks
/// 2. Removes `.` and `..` components via lexical normalization
/// 3. Converts to POSIX format (forward slashes)
/// 4. Returns the path relative to the source root
///
/// # Arguments
/// * `path` - Local path to convert
/// * `root` - Source root directory
///
/// # Returns
/// POSIX-style relative path suitable for use as an object key.
///
/// # Errors
/// Returns error if path is outside the root directory.
pub fn relative_key(path: &Path, root: &Path) -> Result<String, PathError> {
    let abs_path: PathBuf = to_absolute(path)?;
    let normalized: PathBuf = lexical_normalize(&abs_path);

    let abs_root: PathBuf = to_absolute(root)?;
    let normalized_root: PathBuf = lexical_normalize(&abs_root);

    let relative: &Path =
        normalized
            .strip_prefix(&normalized_root)
            .map_err(|_| PathError::PathOutsideRoot {
                path: normalized.display().to_string(),
                root: normalized_root.display().to_string(),
            })?;

    Ok(to_posix_path(relative))
}

/// Convert a path to POSIX-style string (forward slashes).
///
/// # Arguments
/// * `path` - Path to convert
///
/// # Returns
/// String with forward slashes as separators.
pub fn to_posix_path(path: &Path) -> String {
    path.components()
        .map(|c: Component| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Convert a POSIX-format key back to the host OS path format.
///
/// # Arguments
/// * `key` - POSIX-style relative path
/// * `root` - Local root directory
///
/// # Returns
/// PathBuf with OS-native separators.
pub fn from_posix_path(key: &str, root: &Path) -> PathBuf {
    let components: Vec<&str> = key.split('/').collect();
    let mut result: PathBuf = root.to_path_buf();

    for component in components {
        if !component.is_empty() {
            result.push(component);
        }
    }

    result
}

/// Join a destination prefix onto a root-relative key.
///
/// An empty prefix leaves the key unchanged; surrounding slashes on the
/// prefix are not duplicated in the result.
///
/// # Arguments
/// * `prefix` - Destination prefix (may be empty)
/// * `relative` - Root-relative POSIX key
///
/// # Returns
/// The full destination key.
pub fn join_key(prefix: &str, relative: &str) -> String {
    let trimmed: &str = prefix.trim_matches('/');
    if trimmed.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", trimmed, relative)
    }
}
