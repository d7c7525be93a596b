//! # Comment Style Module
//!
//! Static mapping from a file's extension (or, for extensionless conventions
//! such as `Dockerfile` and `Gemfile`, its whole base name) to the comment
//! syntax used to wrap a license header in that language.
//!
//! Lookups are case-insensitive. A file whose key is absent from the table is
//! unsupported: no header is rendered for it and it is never reported as
//! missing one.

use std::path::Path;

/// How a license body is wrapped in a language's comment syntax.
///
/// `top` and `bottom` are emitted as standalone lines when non-empty, and
/// every body line is prefixed with `middle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line opening the comment block (e.g. `/*`), empty for line comments
  pub top: &'static str,

  /// Prefix for every line of the license body (e.g. ` * ` or `// `)
  pub middle: &'static str,

  /// Line closing the comment block (e.g. ` */`), empty for line comments
  pub bottom: &'static str,
}

impl CommentStyle {
  /// Create a line-comment style (no top/bottom markers).
  pub const fn line(prefix: &'static str) -> Self {
    Self {
      top: "",
      middle: prefix,
      bottom: "",
    }
  }

  /// Create a block-comment style.
  pub const fn block(top: &'static str, middle: &'static str, bottom: &'static str) -> Self {
    Self { top, middle, bottom }
  }
}

const C_BLOCK: CommentStyle = CommentStyle::block("/*", " * ", " */");
const DOC_BLOCK: CommentStyle = CommentStyle::block("/**", " * ", " */");
const SLASH_LINE: CommentStyle = CommentStyle::line("// ");
const HASH_LINE: CommentStyle = CommentStyle::line("# ");
const SEMICOLON_LINE: CommentStyle = CommentStyle::line(";; ");
const PERCENT_LINE: CommentStyle = CommentStyle::line("% ");
const DASH_LINE: CommentStyle = CommentStyle::line("-- ");
const MARKUP_BLOCK: CommentStyle = CommentStyle::block("<!--", " ", "-->");
const ML_BLOCK: CommentStyle = CommentStyle::block("(**", "   ", "*)");

/// Returns the lookup key for a path.
///
/// The key is the lower-cased extension including its leading dot, taken
/// from the last `.` of the base name. Names without a dot fall back to the
/// whole lower-cased base name, so `Dockerfile` yields `dockerfile` while
/// `build.Dockerfile` yields `.dockerfile`.
pub fn file_extension(path: &Path) -> String {
  let name = path
    .file_name()
    .map(|name| name.to_string_lossy())
    .unwrap_or_else(|| path.as_os_str().to_string_lossy());

  match name.rfind('.') {
    Some(idx) => name[idx..].to_lowercase(),
    None => name.to_lowercase(),
  }
}

/// Looks up the comment style for a lookup key produced by [`file_extension`].
pub fn style_for_extension(extension: &str) -> Option<CommentStyle> {
  let style = match extension {
    ".c" | ".h" => C_BLOCK,
    ".js" | ".mjs" | ".cjs" | ".jsx" | ".tsx" | ".css" | ".tf" | ".ts" => DOC_BLOCK,
    ".cc" | ".cpp" | ".cs" | ".go" | ".hh" | ".hpp" | ".java" | ".m" | ".mm" | ".proto" | ".rs" | ".scala"
    | ".swift" | ".dart" | ".groovy" | ".kt" | ".kts" | ".php" => SLASH_LINE,
    ".py" | ".sh" | ".yaml" | ".yml" | ".dockerfile" | "dockerfile" | ".rb" | "gemfile" => HASH_LINE,
    ".el" | ".lisp" => SEMICOLON_LINE,
    ".erl" => PERCENT_LINE,
    ".hs" | ".sql" => DASH_LINE,
    ".html" | ".xml" | ".vue" => MARKUP_BLOCK,
    ".ml" | ".mli" | ".mll" | ".mly" => ML_BLOCK,
    _ => return None,
  };

  Some(style)
}

/// Resolves the comment style for a file, or `None` if the file type is
/// unsupported.
pub fn resolve(path: &Path) -> Option<CommentStyle> {
  style_for_extension(&file_extension(path))
}
