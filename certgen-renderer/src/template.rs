//! Certificate template: `{{KEY}}` placeholders in a LaTeX document.

use std::path::{Path, PathBuf};

use certgen_core::FieldSet;

use crate::error::RenderError;

/// Built-in certificate, baked into the binary at compile time.
const EMBEDDED_TEMPLATE: &str = include_str!("templates/certificate.tex");

/// Marker opening the body region of a document.
pub const BODY_START: &str = r"\begin{document}";
/// Marker closing the body region of a document.
pub const BODY_END: &str = r"\end{document}";

/// Where a [`Template`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
    Inline,
}

/// Immutable template text, loaded once.
#[derive(Debug, Clone)]
pub struct Template {
    source: TemplateSource,
    text: String,
}

impl Template {
    /// The built-in certificate template.
    pub fn embedded() -> Self {
        Self {
            source: TemplateSource::Embedded,
            text: EMBEDDED_TEMPLATE.to_string(),
        }
    }

    /// Read a template file.
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path).map_err(|source| RenderError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded template {} ({} bytes)", path.display(), text.len());
        Ok(Self {
            source: TemplateSource::File(path.to_path_buf()),
            text,
        })
    }

    /// A file template when `path` is given, the embedded one otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, RenderError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::embedded()),
        }
    }

    /// Template from literal text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: TemplateSource::Inline,
            text: text.into(),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fill this template with `fields`. See [`fill`].
    pub fn fill(&self, fields: &FieldSet) -> String {
        fill(&self.text, fields)
    }
}

/// Replace every `{{key}}` for `key` in `fields` with its value.
///
/// Single left-to-right pass: inserted values are never rescanned, so a value
/// containing `{{OTHER}}` stays literal. At a given position keys are tried in
/// insertion order. Unknown placeholders are left verbatim and unused fields
/// are ignored.
pub fn fill(template: &str, fields: &FieldSet) -> String {
    let tokens: Vec<(String, &str)> = fields
        .iter()
        .map(|(key, value)| (format!("{{{{{key}}}}}"), value))
        .collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("{{") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match tokens
            .iter()
            .find(|(token, _)| candidate.starts_with(token.as_str()))
        {
            Some((token, value)) => {
                out.push_str(value);
                rest = &candidate[token.len()..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offsets `(body_start, body_end)` of the region between the markers.
fn body_bounds(document: &str) -> Option<(usize, usize)> {
    let start = document.find(BODY_START)? + BODY_START.len();
    let end = document.find(BODY_END)?;
    (end >= start).then_some((start, end))
}

/// The trimmed text between [`BODY_START`] and [`BODY_END`].
///
/// `None` when either marker is missing or they are out of order.
pub fn extract_body(document: &str) -> Option<&str> {
    body_bounds(document).map(|(start, end)| document[start..end].trim())
}

/// Everything up to and including [`BODY_START`].
pub fn preamble(document: &str) -> Option<&str> {
    body_bounds(document).map(|(start, _)| &document[..start])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
