//! Exclude-pattern matching for file selection.
//!
//! Exclude patterns use standard glob syntax (`*`, `**`, character classes,
//! braces) with one extension: a pattern that contains no path separator is
//! matched against the final path segment alone, so `*.txt` excludes
//! `a/b/c.txt` without needing a `**/` prefix.
//!
//! Blank entries are discarded at construction. A blank pattern would
//! otherwise match every candidate and silently exclude all files.

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::FileSystemError;

/// A single compiled exclude pattern.
#[derive(Debug, Clone)]
struct ExcludeMatcher {
    /// Match against the final path segment only (pattern had no separator).
    base_name_only: bool,
    /// Compiled pattern.
    matcher: GlobMatcher,
}

/// Compiled exclude-pattern set applied to root-relative candidate paths.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    /// Retained (non-blank) patterns, in input order.
    patterns: Vec<String>,
    /// Compiled patterns, parallel to `patterns`.
    matchers: Vec<ExcludeMatcher>,
}

impl ExcludeFilter {
    /// Compile a set of exclude patterns.
    ///
    /// Entries that are empty after trimming are discarded before
    /// compilation.
    ///
    /// # Arguments
    /// * `patterns` - Exclude glob patterns
    ///
    /// # Errors
    /// Returns error if any retained pattern is invalid.
    pub fn new(patterns: &[String]) -> Result<Self, FileSystemError> {
        let mut retained: Vec<String> = Vec::new();
        let mut matchers: Vec<ExcludeMatcher> = Vec::new();

        for pattern in patterns {
            if pattern.trim().is_empty() {
                continue;
            }

            let glob: Glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| FileSystemError::InvalidGlobPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;

            matchers.push(ExcludeMatcher {
                base_name_only: !pattern.contains('/'),
                matcher: glob.compile_matcher(),
            });
            retained.push(pattern.clone());
        }

        log::info!("active exclude patterns: {:?}", retained);

        Ok(Self {
            patterns: retained,
            matchers,
        })
    }

    /// Check whether a root-relative path is excluded.
    ///
    /// # Arguments
    /// * `relative_path` - Normalized POSIX-style path to check
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.matchers.iter().any(|m: &ExcludeMatcher| {
            if m.base_name_only {
                let base: &str = relative_path.rsplit('/').next().unwrap_or(relative_path);
                m.matcher.is_match(base)
            } else {
                m.matcher.is_match(relative_path)
            }
        })
    }

    /// Check if the filter has any patterns.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Get the retained patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> ExcludeFilter {
        let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludeFilter::new(&owned).unwrap()
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let f: ExcludeFilter = filter(&[]);
        assert!(f.is_empty());
        assert!(!f.is_excluded("any/path/file.txt"));
    }

    #[test]
    fn test_blank_entries_discarded() {
        let f: ExcludeFilter = filter(&["", "   ", "*.tmp"]);
        assert_eq!(f.patterns(), &["*.tmp".to_string()]);
        assert!(f.is_excluded("file.tmp"));
        assert!(!f.is_excluded("file.txt"));
    }

    #[test]
    fn test_only_blank_entries_excludes_nothing() {
        let f: ExcludeFilter = filter(&["", "  "]);
        assert!(f.is_empty());
        assert!(!f.is_excluded("file.txt"));
        assert!(!f.is_excluded("deep/nested/file.txt"));
    }

    #[test]
    fn test_base_name_matching() {
        // No separator in the pattern: match the final segment alone
        let f: ExcludeFilter = filter(&["*.txt"]);
        assert!(f.is_excluded("c.txt"));
        assert!(f.is_excluded("a/b/c.txt"));
        assert!(!f.is_excluded("a/b/c.yaml"));
    }

    #[test]
    fn test_full_path_matching() {
        let f: ExcludeFilter = filter(&["**/*.txt"]);
        assert!(f.is_excluded("src/exclude.txt"));
        assert!(f.is_excluded("exclude.txt"));
        assert!(!f.is_excluded("src/exclude.yaml"));
    }

    #[test]
    fn test_separator_pattern_is_not_base_name_matched() {
        let f: ExcludeFilter = filter(&["build/*.txt"]);
        assert!(f.is_excluded("build/notes.txt"));
        assert!(!f.is_excluded("other/notes.txt"));
        assert!(!f.is_excluded("build/deep/notes.txt"));
    }

    #[test]
    fn test_directory_subtree_exclusion() {
        let f: ExcludeFilter = filter(&["**/node_modules/**"]);
        assert!(f.is_excluded("node_modules/lodash/index.js"));
        assert!(f.is_excluded("packages/app/node_modules/react/index.js"));
        assert!(!f.is_excluded("src/index.js"));
    }

    #[test]
    fn test_brace_expansion() {
        let f: ExcludeFilter = filter(&["*.{png,jpg}"]);
        assert!(f.is_excluded("textures/wood.png"));
        assert!(f.is_excluded("photo.jpg"));
        assert!(!f.is_excluded("file.gif"));
    }

    #[test]
    fn test_invalid_pattern() {
        let patterns: Vec<String> = vec!["[invalid".to_string()];
        let result: Result<ExcludeFilter, FileSystemError> = ExcludeFilter::new(&patterns);
        assert!(matches!(
            result,
            Err(FileSystemError::InvalidGlobPattern { .. })
        ));
    }
}
