//! The external typesetter capability.
//!
//! A [`Typesetter`] takes a document file name and the directory to run in,
//! and reports the exit code, captured output and the artifact it produced.
//! [`CommandTypesetter`] runs a real program (XeLaTeX by default); tests
//! substitute their own implementation.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use certgen_core::EngineConfig;

use crate::error::TypesetError;

/// Result of one typesetter invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// The expected artifact, if it exists after the run.
    pub artifact: Option<PathBuf>,
}

impl CompileOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Diagnostic text worth showing a user: stderr, or the tail of stdout
    /// when stderr is empty (TeX engines report errors on stdout).
    pub fn diagnostics(&self) -> String {
        const TAIL_LINES: usize = 20;
        if !self.stderr.trim().is_empty() {
            return self.stderr.trim_end().to_string();
        }
        let lines: Vec<&str> = self.stdout.trim_end().lines().collect();
        let start = lines.len().saturating_sub(TAIL_LINES);
        lines[start..].join("\n")
    }
}

/// Converts a document into a fixed-layout artifact.
pub trait Typesetter {
    /// Extension of the produced artifact, without the dot.
    fn artifact_extension(&self) -> &str;

    /// Extensions of byproducts to delete after a successful run.
    fn aux_extensions(&self) -> &[String];

    /// Run on `document` (relative to `workdir`) with `workdir` as the
    /// working directory. Blocks until the tool exits.
    fn compile(&self, document: &Path, workdir: &Path) -> Result<CompileOutput, TypesetError>;
}

/// Path of the artifact a document produces: same stem, artifact extension.
///
/// Only the document's final extension is replaced, so `cert.v2.tex`
/// yields `cert.v2.pdf`.
pub fn expected_artifact(workdir: &Path, document: &Path, extension: &str) -> PathBuf {
    let stem = document.file_stem().unwrap_or(document.as_os_str());
    workdir.join(format!("{}.{extension}", stem.to_string_lossy()))
}

/// Runs an external program, e.g. `xelatex -interaction=nonstopmode <doc>`.
#[derive(Debug, Clone)]
pub struct CommandTypesetter {
    program: String,
    args: Vec<String>,
    artifact_extension: String,
    aux_extensions: Vec<String>,
}

impl CommandTypesetter {
    pub fn new(config: &EngineConfig) -> Self {
        CommandTypesetter {
            program: config.program.clone(),
            args: config.args.clone(),
            artifact_extension: config.artifact_extension.clone(),
            aux_extensions: config.aux_extensions.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn_error(&self, source: io::Error) -> TypesetError {
        if source.kind() == io::ErrorKind::NotFound {
            TypesetError::ToolNotFound {
                program: self.program.clone(),
            }
        } else {
            TypesetError::Spawn {
                program: self.program.clone(),
                source,
            }
        }
    }

    /// First line of `<program> --version`, to check the tool is installed.
    pub fn version(&self) -> Result<String, TypesetError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            return Err(TypesetError::Spawn {
                program: self.program.clone(),
                source: io::Error::new(
                    io::ErrorKind::Other,
                    format!("--version exited with {}", output.status),
                ),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }
}

impl Typesetter for CommandTypesetter {
    fn artifact_extension(&self) -> &str {
        &self.artifact_extension
    }

    fn aux_extensions(&self) -> &[String] {
        &self.aux_extensions
    }

    fn compile(&self, document: &Path, workdir: &Path) -> Result<CompileOutput, TypesetError> {
        tracing::debug!(
            "running {} {:?} {} in {}",
            self.program,
            self.args,
            document.display(),
            workdir.display()
        );
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(document)
            .current_dir(workdir)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let artifact = expected_artifact(workdir, document, &self.artifact_extension);
        Ok(CompileOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            artifact: artifact.exists().then_some(artifact),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
