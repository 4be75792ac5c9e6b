//! Part arithmetic for multipart transfers.
//!
//! This module contains pure logic for the single-put/multipart decision
//! and part layout. No I/O operations - just decision making.

use crate::types::{MULTIPART_THRESHOLD, PART_SIZE};

/// Layout of a single part of a multipart transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInfo {
    /// 1-based part number, as the multipart protocol requires.
    pub number: i32,
    /// Byte offset within the file.
    pub offset: u64,
    /// Length of this part in bytes.
    pub length: u64,
}

/// Determine if a file is transferred as a multipart upload.
///
/// Files at or below the threshold are sent with a single put.
pub fn needs_multipart(size: u64) -> bool {
    size > MULTIPART_THRESHOLD
}

/// Generate part layout for a multipart transfer.
///
/// Splits a file of `size` bytes into parts of `part_size` bytes.
/// The last part may be smaller than `part_size`.
///
/// # Arguments
/// * `size` - Total file size in bytes
/// * `part_size` - Size of each part (use PART_SIZE)
///
/// # Returns
/// Vector of PartInfo describing each part's number, offset and length.
pub fn generate_parts(size: u64, part_size: u64) -> Vec<PartInfo> {
    let mut parts: Vec<PartInfo> = Vec::new();
    let mut offset: u64 = 0;
    let mut number: i32 = 1;

    while offset < size {
        let length: u64 = std::cmp::min(part_size, size - offset);
        parts.push(PartInfo {
            number,
            offset,
            length,
        });
        offset += length;
        number += 1;
    }

    parts
}

/// Calculate the expected number of parts for a file.
pub fn expected_part_count(size: u64, part_size: u64) -> usize {
    if size == 0 {
        return 0;
    }
    ((size + part_size - 1) / part_size) as usize
}
