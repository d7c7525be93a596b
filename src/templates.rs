//! # Templates Module
//!
//! This module provides the license templates, renders them with a
//! [`LicenseData`] record, and wraps the result in a file type's comment
//! syntax.
//!
//! The module includes:
//! - [`LicenseKind`] for the four built-in licenses
//! - [`LicenseTemplate`] for a parsed template (built-in or custom)
//! - [`LicenseRenderer`] for producing the comment-wrapped header bytes
//!
//! ## Template syntax
//!
//! Templates reference the record with `{{.Year}}` and `{{.Holder}}`.
//! Whitespace inside the braces is allowed. An unterminated action is
//! rejected when the template is parsed; a reference to any other field is
//! rejected when it is rendered.
//!
//! ## Example
//!
//! ```rust
//! use addlicense::comment_style::CommentStyle;
//! use addlicense::templates::{LicenseData, LicenseKind, LicenseRenderer, LicenseTemplate};
//!
//! # fn main() -> anyhow::Result<()> {
//! let template = LicenseTemplate::builtin(LicenseKind::Bsd)?;
//! let renderer = LicenseRenderer::new(
//!   template,
//!   LicenseData {
//!     year: "2024".to_string(),
//!     holder: "Acme Inc".to_string(),
//!   },
//! );
//!
//! let header = renderer.render_header(&CommentStyle::line("// "))?;
//! assert!(header.starts_with(b"// Copyright (c) 2024 Acme Inc"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use crate::comment_style::CommentStyle;

const TMPL_APACHE: &str = r#"Copyright {{.Year}} {{.Holder}}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

const TMPL_BSD: &str = "Copyright (c) {{.Year}} {{.Holder}} All rights reserved.
Use of this source code is governed by a BSD-style
license that can be found in the LICENSE file.";

const TMPL_MIT: &str = r#"Copyright (c) {{.Year}} {{.Holder}}

Permission is hereby granted, free of charge, to any person obtaining a copy of
this software and associated documentation files (the "Software"), to deal in
the Software without restriction, including without limitation the rights to
use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
the Software, and to permit persons to whom the Software is furnished to do so,
subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE."#;

const TMPL_MPL: &str = "This Source Code Form is subject to the terms of the Mozilla Public
License, v. 2.0. If a copy of the MPL was not distributed with this
file, You can obtain one at https://mozilla.org/MPL/2.0/.";

/// One of the bundled license templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseKind {
  /// Apache License 2.0
  Apache,
  /// BSD-style notice pointing at a LICENSE file
  Bsd,
  /// MIT License
  Mit,
  /// Mozilla Public License 2.0
  Mpl,
}

impl LicenseKind {
  /// The raw template text for this license.
  pub const fn template_text(self) -> &'static str {
    match self {
      LicenseKind::Apache => TMPL_APACHE,
      LicenseKind::Bsd => TMPL_BSD,
      LicenseKind::Mit => TMPL_MIT,
      LicenseKind::Mpl => TMPL_MPL,
    }
  }

  pub const fn name(self) -> &'static str {
    match self {
      LicenseKind::Apache => "apache",
      LicenseKind::Bsd => "bsd",
      LicenseKind::Mit => "mit",
      LicenseKind::Mpl => "mpl",
    }
  }
}

impl fmt::Display for LicenseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Error returned when parsing a string into a LicenseKind fails
#[derive(Debug, thiserror::Error)]
#[error("unknown license: {0}")]
pub struct UnknownLicenseError(pub String);

impl FromStr for LicenseKind {
  type Err = UnknownLicenseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "apache" => Ok(LicenseKind::Apache),
      "bsd" => Ok(LicenseKind::Bsd),
      "mit" => Ok(LicenseKind::Mit),
      "mpl" => Ok(LicenseKind::Mpl),
      _ => Err(UnknownLicenseError(s.to_string())),
    }
  }
}

/// Data used to fill out a license template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// The copyright year(s), used verbatim
  pub year: String,
  /// The copyright holder
  pub holder: String,
}

impl LicenseData {
  fn field(&self, name: &str) -> Option<&str> {
    match name {
      "Year" => Some(&self.year),
      "Holder" => Some(&self.holder),
      _ => None,
    }
  }
}

/// Errors produced while parsing or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
  /// The template text is malformed.
  #[error("parse template failed at byte {offset}: {message}")]
  Parse { offset: usize, message: String },

  /// The template references a field the record does not have.
  #[error("render template failed: can't evaluate field {field}")]
  Render { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Literal(String),
  Field(String),
}

/// A parsed license template.
///
/// Parsing happens once; rendering is a pure function of the
/// [`LicenseData`] record and may be repeated from any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
  segments: Vec<Segment>,
}

impl LicenseTemplate {
  /// Parses template text.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::Parse`] if an action is not closed, is empty, or
  /// is not a `.Field` reference.
  pub fn parse(text: &str) -> Result<Self, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
      if open > 0 {
        segments.push(Segment::Literal(rest[..open].to_string()));
      }

      let after_open = &rest[open + 2..];
      let Some(close) = after_open.find("}}") else {
        return Err(TemplateError::Parse {
          offset: offset + open,
          message: "unclosed action".to_string(),
        });
      };

      let action = after_open[..close].trim();
      let field = action.strip_prefix('.').unwrap_or_default();
      if field.is_empty() || !field.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(TemplateError::Parse {
          offset: offset + open,
          message: format!("unsupported action {{{{{}}}}}", action),
        });
      }
      segments.push(Segment::Field(field.to_string()));

      let consumed = open + 2 + close + 2;
      offset += consumed;
      rest = &rest[consumed..];
    }

    if !rest.is_empty() {
      segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(Self { segments })
  }

  /// Parses one of the bundled templates.
  pub fn builtin(kind: LicenseKind) -> Result<Self, TemplateError> {
    Self::parse(kind.template_text())
  }

  /// Renders the template against the record.
  ///
  /// # Errors
  ///
  /// Returns [`TemplateError::Render`] if the template references a field
  /// other than `Year` or `Holder`.
  pub fn render(&self, data: &LicenseData) -> Result<String, TemplateError> {
    let mut out = String::new();
    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => out.push_str(text),
        Segment::Field(name) => {
          let value = data
            .field(name)
            .ok_or_else(|| TemplateError::Render { field: name.clone() })?;
          out.push_str(value);
        }
      }
    }
    Ok(out)
  }
}

/// Renders the license body and wraps it in a comment style.
///
/// The renderer is immutable once built and is shared read-only by every
/// file-processing task.
#[derive(Debug, Clone)]
pub struct LicenseRenderer {
  template: LicenseTemplate,
  data: LicenseData,
}

impl LicenseRenderer {
  pub const fn new(template: LicenseTemplate, data: LicenseData) -> Self {
    Self { template, data }
  }

  /// Renders the raw license body.
  pub fn render(&self) -> Result<String, TemplateError> {
    self.template.render(&self.data)
  }

  /// Renders the header block for a file using the given comment style.
  ///
  /// The block ends with one blank separator line.
  pub fn render_header(&self, style: &CommentStyle) -> Result<Vec<u8>, TemplateError> {
    let body = self.render()?;
    Ok(format_with_comment_style(&body, style).into_bytes())
  }
}

/// Formats license text with the given comment style.
///
/// - `top` is emitted on its own line when non-empty
/// - every body line becomes `middle + line` with trailing whitespace trimmed
/// - `bottom` is emitted on its own line when non-empty
/// - one blank line follows the block
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut result = String::with_capacity(license_text.len() + 256);

  if !style.top.is_empty() {
    result.push_str(style.top);
    result.push('\n');
  }

  for line in license_text.lines() {
    let prefixed = format!("{}{}", style.middle, line);
    result.push_str(prefixed.trim_end());
    result.push('\n');
  }

  if !style.bottom.is_empty() {
    result.push_str(style.bottom);
    result.push('\n');
  }

  result.push('\n');

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  fn acme() -> LicenseData {
    LicenseData {
      year: "2024".to_string(),
      holder: "Acme Inc".to_string(),
    }
  }

  #[test]
  fn test_builtins_parse() {
    for kind in [LicenseKind::Apache, LicenseKind::Bsd, LicenseKind::Mit, LicenseKind::Mpl] {
      assert!(LicenseTemplate::builtin(kind).is_ok(), "{kind}");
    }
  }

  #[test]
  fn test_license_kind_from_str_is_case_insensitive() {
    assert_eq!("Apache".parse::<LicenseKind>().unwrap(), LicenseKind::Apache);
    assert_eq!("MIT".parse::<LicenseKind>().unwrap(), LicenseKind::Mit);
    assert!("gpl".parse::<LicenseKind>().is_err());
  }

  #[test]
  fn test_render_apache_substitutes_fields() {
    let template = LicenseTemplate::builtin(LicenseKind::Apache).unwrap();
    let text = template.render(&acme()).unwrap();
    assert!(text.starts_with("Copyright 2024 Acme Inc\n\nLicensed under the Apache License"));
  }

  #[test]
  fn test_render_mpl_has_no_copyright_line() {
    let template = LicenseTemplate::builtin(LicenseKind::Mpl).unwrap();
    let text = template.render(&acme()).unwrap();
    assert!(!text.to_lowercase().contains("copyright"));
    assert!(text.contains("Mozilla Public"));
  }

  #[test]
  fn test_parse_tolerates_whitespace_in_actions() {
    let template = LicenseTemplate::parse("(c) {{ .Year }} {{.Holder  }}").unwrap();
    assert_eq!(template.render(&acme()).unwrap(), "(c) 2024 Acme Inc");
  }

  #[test]
  fn test_parse_rejects_unclosed_action() {
    let err = LicenseTemplate::parse("Copyright {{.Year").unwrap_err();
    assert!(matches!(err, TemplateError::Parse { offset: 10, .. }));
  }

  #[test]
  fn test_parse_rejects_non_field_action() {
    assert!(LicenseTemplate::parse("{{}}").is_err());
    assert!(LicenseTemplate::parse("{{Year}}").is_err());
    assert!(LicenseTemplate::parse("{{.Year | upper}}").is_err());
  }

  #[test]
  fn test_render_unknown_field_fails() {
    let template = LicenseTemplate::parse("Copyright {{.Author}}").unwrap();
    let err = template.render(&acme()).unwrap_err();
    assert_eq!(
      err,
      TemplateError::Render {
        field: "Author".to_string()
      }
    );
  }

  #[test]
  fn test_render_is_case_sensitive_on_fields() {
    let template = LicenseTemplate::parse("{{.year}}").unwrap();
    assert!(template.render(&acme()).is_err());
  }

  #[test]
  fn test_format_with_line_comment_style() {
    let formatted = format_with_comment_style("Copyright 2024\n\nAll rights reserved.", &CommentStyle::line("// "));
    assert_eq!(formatted, "// Copyright 2024\n//\n// All rights reserved.\n\n");
  }

  #[test]
  fn test_format_with_block_comment_style() {
    let formatted = format_with_comment_style("Copyright 2024", &CommentStyle::block("/*", " * ", " */"));
    assert_eq!(formatted, "/*\n * Copyright 2024\n */\n\n");
  }

  #[test]
  fn test_format_trims_trailing_whitespace() {
    let formatted = format_with_comment_style("a  \n\t\nb", &CommentStyle::block("<!--", " ", "-->"));
    assert_eq!(formatted, "<!--\n a\n\n b\n-->\n\n");
  }

  #[test]
  fn test_render_header_apache_go_style() {
    let renderer = LicenseRenderer::new(LicenseTemplate::builtin(LicenseKind::Apache).unwrap(), acme());
    let header = String::from_utf8(renderer.render_header(&CommentStyle::line("// ")).unwrap()).unwrap();

    assert!(header.starts_with("// Copyright 2024 Acme Inc\n//\n// Licensed under the Apache License, "));
    assert!(header.contains("\n//      http://www.apache.org/licenses/LICENSE-2.0\n"));
    assert!(header.ends_with("// limitations under the License.\n\n"));
  }
}
