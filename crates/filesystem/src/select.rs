//! Include-pattern expansion against the filesystem.
//!
//! Each include pattern is classified up front, then expanded into
//! root-relative candidate paths:
//!
//! - a literal path naming an existing directory is rewritten to
//!   `<path>/*` (immediate children only),
//! - a literal path naming an existing file yields itself,
//! - a literal path naming nothing yields the empty set, not an error,
//! - a wildcard pattern is expanded with standard glob semantics (`*`
//!   never crosses separators, `**` recurses).
//!
//! Candidates may include directories; callers are responsible for
//! skipping them before transfer.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher};
use objsync_common::relative_key;
use walkdir::WalkDir;

use crate::error::FileSystemError;
use crate::glob::ExcludeFilter;

/// Characters that make a pattern a glob rather than a literal path.
const WILDCARD_CHARS: &[char] = &['*', '?', '[', '{'];

/// Up-front classification of an include entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    /// Contains glob metacharacters; expanded by matching.
    Wildcarded,
    /// Literal path naming an existing file.
    LiteralFile,
    /// Literal path naming an existing directory.
    LiteralDirectory,
    /// Literal path naming nothing; yields no candidates.
    NonExistent,
}

/// Classify an include entry relative to the source root.
///
/// # Arguments
/// * `root` - Source root directory
/// * `pattern` - Include entry as given
pub fn classify_include(root: &Path, pattern: &str) -> IncludeKind {
    if pattern.contains(WILDCARD_CHARS) {
        return IncludeKind::Wildcarded;
    }

    let joined: PathBuf = root.join(pattern);
    match std::fs::metadata(&joined) {
        Ok(meta) if meta.is_dir() => IncludeKind::LiteralDirectory,
        Ok(_) => IncludeKind::LiteralFile,
        Err(_) => IncludeKind::NonExistent,
    }
}

/// Expand all include patterns, in order, filtering through the excludes.
///
/// Candidates are yielded per pattern with no cross-pattern
/// deduplication; a file matched by two patterns appears twice.
///
/// # Arguments
/// * `root` - Source root directory
/// * `include` - Include patterns, in order
/// * `exclude` - Exclude patterns (blank entries are discarded)
///
/// # Returns
/// Root-relative POSIX candidate paths in pattern order.
///
/// # Errors
/// Returns error if any pattern fails to compile.
pub fn select(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<String>, FileSystemError> {
    let excludes: ExcludeFilter = ExcludeFilter::new(exclude)?;
    let mut selected: Vec<String> = Vec::new();

    for pattern in include {
        selected.extend(select_pattern(root, pattern, &excludes)?);
    }

    Ok(selected)
}

/// Expand a single include pattern, filtering through the excludes.
///
/// # Arguments
/// * `root` - Source root directory
/// * `pattern` - Include entry as given
/// * `excludes` - Compiled exclude filter
///
/// # Returns
/// Root-relative POSIX candidate paths in deterministic (sorted walk)
/// order.
///
/// # Errors
/// Returns error if the pattern fails to compile.
pub fn select_pattern(
    root: &Path,
    pattern: &str,
    excludes: &ExcludeFilter,
) -> Result<Vec<String>, FileSystemError> {
    // Candidates are root-relative, so a leading "./" would never match.
    let pattern: &str = pattern.trim_start_matches("./");

    let expanded: Vec<String> = match classify_include(root, pattern) {
        IncludeKind::NonExistent => Vec::new(),
        IncludeKind::LiteralFile => {
            vec![relative_key(&root.join(pattern), root)?]
        }
        IncludeKind::LiteralDirectory => {
            let trimmed: &str = pattern.trim_end_matches('/');
            let rewritten: String = if trimmed.is_empty() || trimmed == "." {
                "*".to_string()
            } else {
                format!("{}/*", trimmed)
            };
            expand_glob(root, &rewritten)?
        }
        IncludeKind::Wildcarded => expand_glob(root, pattern)?,
    };

    Ok(expanded
        .into_iter()
        .filter(|candidate: &String| !excludes.is_excluded(candidate))
        .collect())
}

/// Expand a wildcard pattern by walking the filesystem.
fn expand_glob(root: &Path, pattern: &str) -> Result<Vec<String>, FileSystemError> {
    let glob: Glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| FileSystemError::InvalidGlobPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
    let matcher: GlobMatcher = glob.compile_matcher();

    // Walk from the deepest literal directory the pattern names, so a
    // pattern like `assets/img/*.png` does not traverse the whole root.
    let walk_base: PathBuf = root.join(literal_prefix(pattern));
    if !walk_base.exists() {
        return Ok(Vec::new());
    }

    let mut matches: Vec<String> = Vec::new();
    for entry in WalkDir::new(&walk_base).sort_by_file_name() {
        let entry: walkdir::DirEntry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!(
                    "skipping unreadable entry under {}: {}",
                    walk_base.display(),
                    e
                );
                continue;
            }
        };

        let relative: String = relative_key(entry.path(), root)?;
        if relative.is_empty() {
            continue;
        }
        if matcher.is_match(&relative) {
            matches.push(relative);
        }
    }

    Ok(matches)
}

/// Longest leading run of pattern segments with no glob metacharacters.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix: PathBuf = PathBuf::new();
    for segment in pattern.split('/') {
        if segment.contains(WILDCARD_CHARS) {
            break;
        }
        prefix.push(segment);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, relative: &str, contents: &[u8]) {
        let path: PathBuf = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file: std::fs::File = std::fs::File::create(path).unwrap();
        file.write_all(contents).unwrap();
    }

    fn no_excludes() -> ExcludeFilter {
        ExcludeFilter::new(&[]).unwrap()
    }

    #[test]
    fn test_classify_wildcarded() {
        let dir: TempDir = TempDir::new().unwrap();
        assert_eq!(
            classify_include(dir.path(), "src/*.js"),
            IncludeKind::Wildcarded
        );
        assert_eq!(
            classify_include(dir.path(), "file[1].txt"),
            IncludeKind::Wildcarded
        );
    }

    #[test]
    fn test_classify_literal_kinds() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "present.txt", b"x");
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        assert_eq!(
            classify_include(dir.path(), "present.txt"),
            IncludeKind::LiteralFile
        );
        assert_eq!(
            classify_include(dir.path(), "subdir"),
            IncludeKind::LiteralDirectory
        );
        assert_eq!(
            classify_include(dir.path(), "missing.txt"),
            IncludeKind::NonExistent
        );
    }

    #[test]
    fn test_bare_directory_yields_immediate_children() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "docs/a.txt", b"a");
        write_file(dir.path(), "docs/b.txt", b"b");
        write_file(dir.path(), "docs/sub/deep.txt", b"deep");

        let matches: Vec<String> =
            select_pattern(dir.path(), "docs", &no_excludes()).unwrap();

        // Immediate children only: the directory itself and deeper
        // descendants are not candidates.
        assert!(matches.contains(&"docs/a.txt".to_string()));
        assert!(matches.contains(&"docs/b.txt".to_string()));
        assert!(matches.contains(&"docs/sub".to_string()));
        assert!(!matches.contains(&"docs".to_string()));
        assert!(!matches.contains(&"docs/sub/deep.txt".to_string()));
    }

    #[test]
    fn test_directory_with_trailing_slash() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "docs/a.txt", b"a");

        let matches: Vec<String> =
            select_pattern(dir.path(), "docs/", &no_excludes()).unwrap();
        assert_eq!(matches, vec!["docs/a.txt".to_string()]);
    }

    #[test]
    fn test_literal_file_yields_itself() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "docs/a.txt", b"a");

        let matches: Vec<String> =
            select_pattern(dir.path(), "docs/a.txt", &no_excludes()).unwrap();
        assert_eq!(matches, vec!["docs/a.txt".to_string()]);
    }

    #[test]
    fn test_nonexistent_literal_yields_empty() {
        let dir: TempDir = TempDir::new().unwrap();
        let matches: Vec<String> =
            select_pattern(dir.path(), "missing/path.txt", &no_excludes()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_nonexistent_wildcard_base_yields_empty() {
        let dir: TempDir = TempDir::new().unwrap();
        let matches: Vec<String> =
            select_pattern(dir.path(), "missing/*.txt", &no_excludes()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_single_star_does_not_recurse() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "src/func.js", b"f");
        write_file(dir.path(), "src/sub/deep.js", b"d");

        let matches: Vec<String> =
            select_pattern(dir.path(), "src/*.js", &no_excludes()).unwrap();
        assert_eq!(matches, vec!["src/func.js".to_string()]);
    }

    #[test]
    fn test_double_star_recurses() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "src/func.js", b"f");
        write_file(dir.path(), "src/sub/deep.js", b"d");

        let matches: Vec<String> =
            select_pattern(dir.path(), "src/**/*.js", &no_excludes()).unwrap();
        assert!(matches.contains(&"src/func.js".to_string()));
        assert!(matches.contains(&"src/sub/deep.js".to_string()));
    }

    #[test]
    fn test_exclude_filter_applied() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "src/func.js", b"f");
        write_file(dir.path(), "src/exclude.txt", b"t");
        write_file(dir.path(), "src/exclude.yaml", b"y");

        let selected: Vec<String> = select(
            dir.path(),
            &["src/*".to_string()],
            &["**/*.txt".to_string()],
        )
        .unwrap();

        assert_eq!(
            selected,
            vec!["src/exclude.yaml".to_string(), "src/func.js".to_string()]
        );
    }

    #[test]
    fn test_selection_is_idempotent() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"a");
        write_file(dir.path(), "b.txt", b"b");
        write_file(dir.path(), "sub/c.txt", b"c");

        let include: Vec<String> = vec!["**/*.txt".to_string()];
        let exclude: Vec<String> = vec!["b.txt".to_string()];

        let first: Vec<String> = select(dir.path(), &include, &exclude).unwrap();
        let second: Vec<String> = select(dir.path(), &include, &exclude).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_cross_pattern_dedup() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "src/func.js", b"f");

        let selected: Vec<String> = select(
            dir.path(),
            &["src/*".to_string(), "src/func.js".to_string()],
            &[],
        )
        .unwrap();

        assert_eq!(
            selected,
            vec!["src/func.js".to_string(), "src/func.js".to_string()]
        );
    }

    #[test]
    fn test_dot_include_yields_root_children() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"a");
        write_file(dir.path(), "sub/deep.txt", b"d");

        let matches: Vec<String> = select_pattern(dir.path(), ".", &no_excludes()).unwrap();
        assert!(matches.contains(&"a.txt".to_string()));
        assert!(matches.contains(&"sub".to_string()));
        assert!(!matches.contains(&"sub/deep.txt".to_string()));
    }

    #[test]
    fn test_leading_dot_slash_is_normalized() {
        let dir: TempDir = TempDir::new().unwrap();
        write_file(dir.path(), "docs/a.txt", b"a");

        let matches: Vec<String> =
            select_pattern(dir.path(), "./docs/*.txt", &no_excludes()).unwrap();
        assert_eq!(matches, vec!["docs/a.txt".to_string()]);
    }

    #[test]
    fn test_invalid_include_pattern() {
        let dir: TempDir = TempDir::new().unwrap();
        let result: Result<Vec<String>, FileSystemError> =
            select_pattern(dir.path(), "src/[invalid", &no_excludes());
        assert!(matches!(
            result,
            Err(FileSystemError::InvalidGlobPattern { .. })
        ));
    }
}
