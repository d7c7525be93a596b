//! # Content Transformer Module
//!
//! This module recognizes special first lines (shebangs, XML declarations,
//! etc.) that must stay at the top of a file and assembles the new file
//! content around an inserted license header.

/// First-line prefixes that must stay ahead of an inserted header, compared
/// against the lower-cased first line.
pub const SPECIAL_LINE_PREFIXES: [&[u8]; 6] = [
  b"#!",                       // shebang
  b"<?xml",                    // XML declaration
  b"<!doctype",                // HTML doctype
  b"# encoding:",              // Ruby encoding
  b"# frozen_string_literal:", // Ruby interpreter instruction
  b"<?php",                    // PHP opening tag
];

/// Returns the file's first line, including its newline, if it is a special
/// line that must stay first.
///
/// When the content has no newline the whole content is the first line.
pub fn special_first_line(content: &[u8]) -> Option<&[u8]> {
  let line_end = content
    .iter()
    .position(|&b| b == b'\n')
    .map_or(content.len(), |idx| idx + 1);
  let line = &content[..line_end];
  let lowered = line.to_ascii_lowercase();

  SPECIAL_LINE_PREFIXES
    .iter()
    .any(|prefix| lowered.starts_with(prefix))
    .then_some(line)
}

/// Builds the new file content from a rendered header and the original
/// content.
///
/// The layout is `[special line + "\n"]? + header + remaining content`. A
/// special line missing its trailing newline gets one, so the header is always
/// separated from it by exactly one blank line. No byte of the original
/// content is dropped.
pub fn insert_header(header: &[u8], content: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(header.len() + content.len() + 2);

  let remaining = match special_first_line(content) {
    Some(line) => {
      out.extend_from_slice(line);
      if !line.ends_with(b"\n") {
        out.push(b'\n');
      }
      out.push(b'\n');
      &content[line.len()..]
    }
    None => content,
  };

  out.extend_from_slice(header);
  out.extend_from_slice(remaining);
  out
}
