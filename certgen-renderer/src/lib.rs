//! # certgen-renderer
//!
//! Fills the certificate template with per-person fields and assembles
//! single-person and combined multi-person LaTeX documents.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certgen_core::CertificateOptions;
//! use certgen_renderer::{context, DocumentEngine, Template};
//! use chrono::Local;
//!
//! let names = vec!["Doe John".to_string()];
//! let today = Local::now().date_naive();
//! let certs = context::from_names(&names, &CertificateOptions::default(), today);
//! let engine = DocumentEngine::new(Template::embedded());
//! let combined = engine.render_combined(&certs);
//! println!("{} bytes", combined.content.len());
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod template;

pub use context::Certificate;
pub use engine::{CombinedDocument, DocumentEngine, IndividualDocument};
pub use error::RenderError;
pub use template::{fill, Template, TemplateSource};
