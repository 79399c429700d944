//! Document engine for single-person and combined multi-person documents.
//!
//! | Document   | Shape                                                        |
//! |------------|--------------------------------------------------------------|
//! | Individual | The whole filled template, wrapper included                  |
//! | Combined   | One preamble, every body region, `\newpage` between, one end |

use certgen_core::safe_file_stem;

use crate::context::Certificate;
use crate::template::{self, Template, BODY_END};

/// Forced page break placed between consecutive certificates.
pub const PAGE_BREAK: &str = r"\newpage";

/// Preamble used when the template has no body markers.
const FALLBACK_PREAMBLE: &str = "\\documentclass[12pt,a4paper]{article}\n\\begin{document}";

/// One person's standalone document.
#[derive(Debug, Clone)]
pub struct IndividualDocument {
    pub name: String,
    /// `certificate_<safe name>`, without extension.
    pub file_stem: String,
    pub content: String,
}

/// Several certificates in one document.
#[derive(Debug, Clone, Default)]
pub struct CombinedDocument {
    pub content: String,
    /// Names whose body region made it into the document.
    pub included: Vec<String>,
    /// Names dropped because their filled template had no body markers.
    pub skipped: Vec<String>,
}

/// File stem for a person's standalone document and artifact.
pub fn individual_stem(name: &str) -> String {
    format!("certificate_{}", safe_file_stem(name))
}

/// Renders certificates against one [`Template`].
pub struct DocumentEngine {
    template: Template,
}

impl DocumentEngine {
    pub fn new(template: Template) -> Self {
        DocumentEngine { template }
    }

    /// A complete single-person document.
    pub fn render_individual(&self, cert: &Certificate) -> IndividualDocument {
        IndividualDocument {
            name: cert.name.clone(),
            file_stem: individual_stem(&cert.name),
            content: self.template.fill(&cert.fields),
        }
    }

    /// One document holding every certificate's body region.
    ///
    /// The preamble is the template's own, filled with run-wide fields only,
    /// so no person's name, date or id appears in it. Certificates without
    /// markers contribute nothing and are listed in [`CombinedDocument::skipped`].
    pub fn render_combined(&self, certs: &[Certificate]) -> CombinedDocument {
        let mut bodies: Vec<String> = Vec::with_capacity(certs.len());
        let mut doc = CombinedDocument::default();

        for cert in certs {
            let filled = self.template.fill(&cert.fields);
            match template::extract_body(&filled) {
                Some(body) => {
                    bodies.push(body.to_string());
                    doc.included.push(cert.name.clone());
                }
                None => {
                    tracing::warn!("no body markers for '{}'; skipped", cert.name);
                    doc.skipped.push(cert.name.clone());
                }
            }
        }

        let shared = certs
            .first()
            .map(|cert| cert.fields.run_wide())
            .unwrap_or_default();
        let preamble = match template::preamble(self.template.text()) {
            Some(preamble) => template::fill(preamble, &shared),
            None => FALLBACK_PREAMBLE.to_string(),
        };

        let separator = format!("\n\n{PAGE_BREAK}\n\n");
        let mut content = preamble;
        content.push_str("\n\n");
        if !bodies.is_empty() {
            content.push_str(&bodies.join(&separator));
            content.push_str("\n\n");
        }
        content.push_str(BODY_END);
        content.push('\n');
        doc.content = content;
        doc
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
