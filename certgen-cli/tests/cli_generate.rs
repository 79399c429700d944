use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const ROSTER: &str = "\
Lastname,Name,completion_date
Doe,John,2025-01-15
Smith,Jane,2025-01-20
Johnson,Bob,
";

fn certgen_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("certgen"));
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

fn write_roster(dir: &Path) {
    fs::write(dir.join("names.csv"), ROSTER).expect("write roster");
}

/// A stand-in typesetter: writes `<stem>.pdf` and `<stem>.aux` next to the
/// document, or exits 1 with an error on stderr when the stem is `failing_stem`.
#[cfg(unix)]
fn fake_typesetter(dir: &Path, failing_stem: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-typesetter.sh");
    let body = format!(
        "#!/bin/sh\n\
         for arg; do doc=\"$arg\"; done\n\
         stem=\"${{doc%.tex}}\"\n\
         if [ \"$stem\" = \"{failing_stem}\" ]; then echo '! LaTeX Error: boom' >&2; exit 1; fi\n\
         echo pdf > \"$stem.pdf\"\n\
         echo aux > \"$stem.aux\"\n"
    );
    fs::write(&script, body).expect("write script");
    let mut perms = fs::metadata(&script).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod");
    script
}

#[test]
fn generate_without_compile_writes_combined_document() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());

    certgen_cmd(dir.path())
        .args(["generate", "--no-compile"])
        .assert()
        .success()
        .stdout(contains("Reading participants from names.csv"))
        .stdout(contains("Generated LaTeX file"))
        .stdout(contains("Compilation skipped."));

    let combined = fs::read_to_string(dir.path().join("output/tex/certificates.tex"))
        .expect("combined document");
    assert!(combined.contains("Doe John"));
    assert!(combined.contains("Smith Jane"));
    assert!(combined.contains("Johnson Bob"));
    assert!(combined.contains("2025-01-15"));
    assert_eq!(combined.matches("\\newpage").count(), 2);
    assert_eq!(combined.matches("\\end{document}").count(), 1);
    assert!(!dir.path().join("output/pdfs").exists());
}

#[test]
fn generate_json_report_parses() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());

    let output = certgen_cmd(dir.path())
        .args(["generate", "--no-compile", "--json"])
        .output()
        .expect("run certgen");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["source"]["kind"], "roster");
    assert_eq!(report["combined"]["included"].as_array().map(Vec::len), Some(3));
    assert!(report["combined"]["compile"].is_null());
    assert!(report["individual"].is_null());
}

#[test]
fn missing_roster_falls_back_to_example_names() {
    let dir = TempDir::new().expect("tempdir");

    certgen_cmd(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(contains("CSV file 'names.csv' not found"));

    let combined = fs::read_to_string(dir.path().join("output/tex/certificates.tex"))
        .expect("combined document");
    assert!(combined.contains("Lincoln,Abraham"));
    assert!(combined.contains("Mandela,Nelson"));
}

#[test]
fn explicit_names_skip_the_roster() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());

    certgen_cmd(dir.path())
        .args(["generate", "--no-compile", "--name", "Ada Lovelace", "--name", "Alan Turing"])
        .assert()
        .success()
        .stdout(contains("Using 2 name(s) from the command line"));

    let combined = fs::read_to_string(dir.path().join("output/tex/certificates.tex"))
        .expect("combined document");
    assert!(combined.contains("Ada Lovelace"));
    assert!(!combined.contains("Doe John"));
}

#[test]
fn unreadable_template_fails_the_run() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());

    certgen_cmd(dir.path())
        .args(["generate", "--no-compile", "--template", "missing.tex"])
        .assert()
        .failure()
        .stderr(contains("missing.tex"));
}

#[test]
#[cfg(unix)]
fn generate_with_typesetter_collects_artifacts() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());
    let script = fake_typesetter(dir.path(), "none");
    fs::write(
        dir.path().join("certgen.yaml"),
        format!("engine:\n  program: {}\n  args: []\n", script.display()),
    )
    .expect("write config");

    certgen_cmd(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(contains("Individual certificates: 3/3 generated"))
        .stdout(contains("4 artifact(s) produced"));

    let pdfs = dir.path().join("output/pdfs");
    for stem in ["certificate_Doe_John", "certificate_Smith_Jane", "certificate_Johnson_Bob"] {
        assert!(pdfs.join(format!("{stem}.pdf")).exists(), "{stem}.pdf");
        assert!(!dir.path().join(format!("output/tex/{stem}.aux")).exists());
    }
    assert!(pdfs.join("all_certificates.pdf").exists());
}

#[test]
#[cfg(unix)]
fn one_failing_person_is_reported_once() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());
    let script = fake_typesetter(dir.path(), "certificate_Smith_Jane");
    fs::write(
        dir.path().join("certgen.yaml"),
        format!("engine:\n  program: {}\n  args: []\n", script.display()),
    )
    .expect("write config");

    let output = certgen_cmd(dir.path()).arg("generate").output().expect("run certgen");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Individual certificates: 2/3 generated"), "{stdout}");
    assert!(stdout.contains("3 artifact(s) produced"), "{stdout}");
    assert_eq!(stdout.lines().filter(|l| l.contains("Smith Jane")).count(), 1, "{stdout}");
    assert_eq!(stdout.matches("typesetter exited with code 1").count(), 1, "{stdout}");
    assert!(stdout.contains("! LaTeX Error: boom"), "{stdout}");

    let pdfs = dir.path().join("output/pdfs");
    assert!(pdfs.join("certificate_Doe_John.pdf").exists());
    assert!(!pdfs.join("certificate_Smith_Jane.pdf").exists());
    assert!(pdfs.join("certificate_Johnson_Bob.pdf").exists());
}

#[test]
#[cfg(unix)]
fn dotted_combined_document_name_compiles() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());
    let script = fake_typesetter(dir.path(), "none");
    fs::write(
        dir.path().join("certgen.yaml"),
        format!(
            "engine:\n  program: {}\n  args: []\n\
             paths:\n  combined_document: certificates.v2.tex\n",
            script.display()
        ),
    )
    .expect("write config");

    certgen_cmd(dir.path())
        .args(["generate", "--no-individual"])
        .assert()
        .success()
        .stdout(contains("Combined certificates"))
        .stdout(contains("1 artifact(s) produced"));

    assert!(dir.path().join("output/pdfs/all_certificates.pdf").exists());
    assert!(!dir.path().join("output/tex/certificates.v2.pdf").exists());
}

#[test]
fn missing_typesetter_is_reported_per_document() {
    let dir = TempDir::new().expect("tempdir");
    write_roster(dir.path());
    fs::write(
        dir.path().join("certgen.yaml"),
        "engine:\n  program: certgen-no-such-typesetter\n",
    )
    .expect("write config");

    certgen_cmd(dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(contains("Individual certificates: 0/3 generated"))
        .stdout(contains("TeX Live"))
        .stdout(contains("0 artifact(s) produced"));
}
