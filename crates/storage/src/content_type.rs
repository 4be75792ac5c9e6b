//! Content-type detection for destination keys.

use std::path::Path;

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Look up the content type for a file by extension.
///
/// # Arguments
/// * `path` - Local file path
///
/// # Returns
/// The MIME type for the extension, or `text/plain` when unknown.
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
