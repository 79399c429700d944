//! Artifact collection: run the typesetter, move the artifact to its
//! destination and delete the byproducts.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TypesetError;
use crate::typesetter::Typesetter;

/// Why a document did not yield an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The typesetter program is not installed.
    ToolNotFound { program: String },
    /// The typesetter could not be started, or the document not written.
    Invocation { message: String },
    /// The typesetter exited unsuccessfully.
    ExitStatus {
        code: Option<i32>,
        diagnostics: String,
    },
    /// The typesetter succeeded but the expected artifact is missing.
    MissingArtifact { expected: PathBuf },
    /// The artifact could not be moved to its destination.
    Relocation { message: String },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::ToolNotFound { program } => write!(
                f,
                "{}",
                TypesetError::ToolNotFound {
                    program: program.clone()
                }
            ),
            Failure::Invocation { message } => write!(f, "{message}"),
            Failure::ExitStatus { code: Some(code), .. } => {
                write!(f, "typesetter exited with code {code}")
            }
            Failure::ExitStatus { code: None, .. } => write!(f, "typesetter was terminated"),
            Failure::MissingArtifact { expected } => {
                write!(f, "artifact not found after compilation: {}", expected.display())
            }
            Failure::Relocation { message } => write!(f, "could not move artifact: {message}"),
        }
    }
}

impl From<TypesetError> for Failure {
    fn from(err: TypesetError) -> Self {
        match err {
            TypesetError::ToolNotFound { program } => Failure::ToolNotFound { program },
            other => Failure::Invocation {
                message: other.to_string(),
            },
        }
    }
}

/// Move `from` to `to`, copying across filesystems when a rename is refused.
pub fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}

/// Delete `<workdir>/<stem>.<ext>` for each byproduct extension, if present.
pub fn cleanup_aux(workdir: &Path, stem: &str, extensions: &[String]) {
    for ext in extensions {
        let path = workdir.join(format!("{stem}.{ext}"));
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("could not remove {}: {e}", path.display()),
        }
    }
}

/// Typeset `document` inside `workdir`; on success move the artifact to
/// `destination` and delete byproducts.
pub fn compile_and_collect(
    typesetter: &dyn Typesetter,
    document: &Path,
    workdir: &Path,
    destination: &Path,
) -> Result<PathBuf, Failure> {
    let file_name = document.file_name().map(Path::new).unwrap_or(document);
    let output = typesetter.compile(file_name, workdir)?;

    if !output.success() {
        return Err(Failure::ExitStatus {
            code: output.exit_code,
            diagnostics: output.diagnostics(),
        });
    }
    let Some(artifact) = output.artifact else {
        let expected = crate::typesetter::expected_artifact(
            workdir,
            file_name,
            typesetter.artifact_extension(),
        );
        return Err(Failure::MissingArtifact { expected });
    };

    relocate(&artifact, destination).map_err(|e| Failure::Relocation {
        message: format!("{} -> {}: {e}", artifact.display(), destination.display()),
    })?;

    if let Some(stem) = file_name.file_stem().and_then(|s| s.to_str()) {
        cleanup_aux(workdir, stem, typesetter.aux_extensions());
    }
    tracing::info!("generated: {}", destination.display());
    Ok(destination.to_path_buf())
}
