use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SCENE: &str = r#"import { GOLD, RadialGlow } from "./shared";

const SceneHero = () => {
  const { width } = useVideoConfig();
  return <RadialGlow color={GOLD} size={640} style={{ padding: "80px 48px" }} />;
};
"#;

#[test]
fn test_cli_rewrites_directory() -> Result<()> {
    let temp = TempDir::new()?;
    let file = temp.path().join("Ad12_Hero_V5.tsx");
    fs::write(&file, SCENE)?;

    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 files matching Ad*_V5.tsx"))
        .stdout(predicate::str::contains("[UPDATED]"))
        .stdout(predicate::str::contains("Ad12_Hero_V5.tsx"))
        .stdout(predicate::str::contains("Updated 1/1 files"));

    let text = fs::read_to_string(&file)?;
    assert!(text.contains("import { GOLD, RadialGlow, useScale } from \"./shared\";"));
    assert!(text.contains("  const s = useScale();\n"));
    assert!(text.contains("size={s(640)}"));
    assert!(text.contains("padding: `${s(80)}px ${s(48)}px`"));
    Ok(())
}

#[test]
fn test_cli_check_fails_on_pending_changes() -> Result<()> {
    let temp = TempDir::new()?;
    let file = temp.path().join("Ad12_Hero_V5.tsx");
    fs::write(&file, SCENE)?;

    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg(temp.path())
        .arg("--check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[WOULD UPDATE]"));

    assert_eq!(fs::read_to_string(&file)?, SCENE);
    Ok(())
}

#[test]
fn test_cli_stdin_filter() -> Result<()> {
    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg("--stdin")
        .write_stdin("const title = { fontSize: 72, gap: 3 };\n")
        .assert()
        .success()
        .stdout("const title = { fontSize: s(72), gap: 3 };\n");
    Ok(())
}

#[test]
fn test_cli_missing_root() -> Result<()> {
    let temp = TempDir::new()?;
    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_cli_verbose_logs_to_stderr() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("Ad1_V5.tsx"), SCENE)?;

    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg(temp.path())
        .arg("--verbose")
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("[VERBOSE] pxscale v"))
        .stderr(predicate::str::contains("[VERBOSE] Ad1_V5.tsx: import=1"))
        .stdout(predicate::str::contains("[VERBOSE]").not());
    Ok(())
}

#[test]
fn test_cli_help() -> Result<()> {
    let mut cmd = Command::cargo_bin("pxscale")?;
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("[pxscale.thresholds]"));
    Ok(())
}
