//! Source map (revision 3) encoding.
//!
//! # Mapping grammar
//!
//! ```text
//! mappings = line (";" line)*
//! line     = segment ("," segment)*
//! segment  = VLQ(out_col) VLQ(file) VLQ(in_line) VLQ(in_col)   (all deltas)
//! ```
//!
//! The output column delta restarts at every line; the other three carry
//! over line boundaries.

use std::io::Write;

use serde::Serialize;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Incremental builder of the `mappings` string.
#[derive(Debug, Default, Clone)]
pub struct SourceMap {
    mappings: String,
    last_out_col: i64,
    last_file: i64,
    last_in_line: i64,
    last_in_col: i64,
    /// A segment was already emitted on the current output line.
    sep: bool,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map output column `out_col` of the current output line to
    /// `(in_line, in_col)` of source `file`.
    pub fn map(&mut self, out_col: i64, in_line: i64, in_col: i64, file: i64) {
        if self.sep {
            self.mappings.push(',');
        }
        self.sep = true;

        vlq_append(&mut self.mappings, out_col - self.last_out_col);
        vlq_append(&mut self.mappings, file - self.last_file);
        vlq_append(&mut self.mappings, in_line - self.last_in_line);
        vlq_append(&mut self.mappings, in_col - self.last_in_col);

        self.last_out_col = out_col;
        self.last_file = file;
        self.last_in_line = in_line;
        self.last_in_col = in_col;
    }

    /// Start a new output line.
    pub fn add_line(&mut self) {
        self.mappings.push(';');
        self.last_out_col = 0;
        self.sep = false;
    }

    /// Encoded mappings so far.
    pub fn mappings(&self) -> &str {
        &self.mappings
    }
}

/// Append one signed value as base64 VLQ.
///
/// The sign goes to bit 0, then 5-bit groups follow least significant first,
/// with the continuation bit (0x20) set on all groups but the last.
pub fn vlq_append(out: &mut String, value: i64) {
    let mut v: u64 = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        (value as u64) << 1
    };
    while v >= 32 {
        out.push(BASE64[((v & 0x1F) | 0x20) as usize] as char);
        v >>= 5;
    }
    out.push(BASE64[v as usize] as char);
}

// ============================================================================
// Document
// ============================================================================

/// The `.map` JSON document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDocument {
    pub version: u8,
    pub file: String,
    pub source_root: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMapDocument {
    pub fn new(file: String, sources: Vec<String>, mappings: String) -> Self {
        Self {
            version: 3,
            file,
            source_root: String::new(),
            sources,
            names: Vec::new(),
            mappings,
        }
    }

    pub fn write_to(&self, out: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer(out, self)
    }
}
