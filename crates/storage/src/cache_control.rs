//! Cache-control rule table.
//!
//! Rules arrive as `"keys:value"` strings, e.g.
//! `"*.html,*.css:public, max-age=3600"`. Each entry is split on the first
//! `:`; the key side is split on `,` and every trimmed token becomes an
//! independent pattern sharing the trimmed value. Insertion order is match
//! order, first match wins. The literal pattern `"*"` is popped into the
//! table's default value at construction and is never matched as a rule;
//! a blank `"*"` value leaves the default absent.
//!
//! An entry with no `:` is accepted permissively as a whole-string key set
//! with an empty value.

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::StorageError;

/// One compiled pattern/value rule.
#[derive(Debug, Clone)]
struct CacheControlRule {
    /// Pattern as written.
    pattern: String,
    /// Compiled pattern.
    matcher: GlobMatcher,
    /// Header value for matching keys.
    value: String,
}

/// Ordered pattern-to-value mapping with one fallback value.
#[derive(Debug, Clone, Default)]
pub struct CacheControlRules {
    /// Rules in insertion order.
    rules: Vec<CacheControlRule>,
    /// Fallback for keys no rule matches.
    default_value: Option<String>,
}

impl CacheControlRules {
    /// Parse `"keys:value"` format strings into a rule table.
    ///
    /// # Arguments
    /// * `formats` - Rule strings, in order
    ///
    /// # Errors
    /// Returns error if a pattern fails to compile.
    pub fn parse(formats: &[String]) -> Result<Self, StorageError> {
        let mut entries: Vec<(String, String)> = Vec::new();

        for format in formats {
            let (keys_part, value_part): (&str, &str) = match format.split_once(':') {
                Some((keys, value)) => (keys, value),
                // Permissive: treat the whole string as a key set with an
                // empty value rather than rejecting the entry.
                None => (format.as_str(), ""),
            };

            let value: &str = value_part.trim();
            for key in keys_part.split(',') {
                let key: &str = key.trim();
                match entries.iter_mut().find(|(pattern, _)| pattern == key) {
                    Some((_, existing)) => *existing = value.to_string(),
                    None => entries.push((key.to_string(), value.to_string())),
                }
            }
        }

        // Pop "*" into the default; a blank value leaves the default absent.
        let default_value: Option<String> =
            match entries.iter().position(|(pattern, _)| pattern == "*") {
                Some(index) => {
                    let (_, value): (String, String) = entries.remove(index);
                    let trimmed: &str = value.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                }
                None => None,
            };

        let mut rules: Vec<CacheControlRule> = Vec::with_capacity(entries.len());
        for (pattern, value) in entries {
            let glob: Glob = GlobBuilder::new(&pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| StorageError::InvalidConfig {
                    message: format!("invalid cache-control pattern '{}': {}", pattern, e),
                })?;
            rules.push(CacheControlRule {
                pattern,
                matcher: glob.compile_matcher(),
                value,
            });
        }

        Ok(Self {
            rules,
            default_value,
        })
    }

    /// Resolve the cache-control value for a destination key.
    ///
    /// Scans rules in insertion order and returns the value of the first
    /// pattern that matches; otherwise the default, when present. `None`
    /// means no cache-control header is emitted.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        for rule in &self.rules {
            if rule.matcher.is_match(key) {
                return Some(&rule.value);
            }
        }
        self.default_value.as_deref()
    }

    /// Patterns retained as matchable rules, in order.
    pub fn patterns(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|r: &CacheControlRule| r.pattern.as_str())
            .collect()
    }

    /// The fallback value, when present.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}
