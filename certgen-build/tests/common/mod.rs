//! Scripted typesetter shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use certgen_build::{CompileOutput, Typesetter, TypesetError};

/// What the scripted tool does for a given document stem.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Exit 0, write `<stem>.pdf` plus `.aux` and `.log` byproducts.
    Succeed,
    /// Exit with `code`, print `stderr`, write only a log.
    Exit { code: i32, stderr: String },
    /// Exit 0 but produce no artifact.
    NoArtifact,
    /// Behave as if the program is not installed.
    Missing,
}

pub struct ScriptedTypesetter {
    default: Behavior,
    overrides: HashMap<String, Behavior>,
    aux: Vec<String>,
    pub calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl ScriptedTypesetter {
    pub fn new(default: Behavior) -> Self {
        ScriptedTypesetter {
            default,
            overrides: HashMap::new(),
            aux: vec!["aux".to_string(), "log".to_string(), "out".to_string()],
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Behavior::Succeed)
    }

    pub fn with(mut self, stem: &str, behavior: Behavior) -> Self {
        self.overrides.insert(stem.to_string(), behavior);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Typesetter for ScriptedTypesetter {
    fn artifact_extension(&self) -> &str {
        "pdf"
    }

    fn aux_extensions(&self) -> &[String] {
        &self.aux
    }

    fn compile(&self, document: &Path, workdir: &Path) -> Result<CompileOutput, TypesetError> {
        self.calls
            .borrow_mut()
            .push((document.to_path_buf(), workdir.to_path_buf()));
        assert!(
            workdir.join(document).exists(),
            "document {} must exist before typesetting",
            workdir.join(document).display()
        );

        let stem = document
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let behavior = self.overrides.get(&stem).unwrap_or(&self.default).clone();
        let write = |ext: &str| {
            let path = workdir.join(format!("{stem}.{ext}"));
            std::fs::write(&path, format!("{ext} for {stem}")).expect("write fake output");
            path
        };

        match behavior {
            Behavior::Succeed => {
                write("aux");
                write("log");
                let artifact = write("pdf");
                Ok(CompileOutput {
                    exit_code: Some(0),
                    stdout: "Output written".to_string(),
                    stderr: String::new(),
                    artifact: Some(artifact),
                })
            }
            Behavior::Exit { code, stderr } => {
                write("log");
                Ok(CompileOutput {
                    exit_code: Some(code),
                    stdout: String::new(),
                    stderr,
                    artifact: None,
                })
            }
            Behavior::NoArtifact => Ok(CompileOutput {
                exit_code: Some(0),
                ..CompileOutput::default()
            }),
            Behavior::Missing => Err(TypesetError::ToolNotFound {
                program: "xelatex".to_string(),
            }),
        }
    }
}
