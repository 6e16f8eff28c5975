use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, entry, stdout};

const SOURCE: &str = r#"const title = "Welcome back";
const price = "$100";
alert("Saved", id);
T("Already wrapped");
"#;

#[test]
fn test_extract_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", SOURCE)?;

    let output = test.subcommand("extract").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Would add 2 strings to 1 registry file"), "{}", out);
    assert!(!test.root().join("i18n").exists());
    Ok(())
}

#[test]
fn test_extract_apply_writes_registry() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", SOURCE)?;

    let output = test.subcommand("extract").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_registry("i18n/src/app.ts.en.json")?,
        vec![
            entry("Welcome back", "Welcome back", false),
            entry("Saved", "Saved", false),
        ]
    );
    Ok(())
}

#[test]
fn test_extract_keeps_existing_translations() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", SOURCE)?;
    test.write_file(
        "i18n/src/app.ts.en.json",
        r#"[{"id": "Saved", "translation": "Guardado", "modified": true}]"#,
    )?;

    let output = test.subcommand("extract").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_registry("i18n/src/app.ts.en.json")?,
        vec![
            entry("Saved", "Guardado", true),
            entry("Welcome back", "Welcome back", false),
        ]
    );
    Ok(())
}

#[test]
fn test_extract_uses_source_locale() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", SOURCE)?;

    let output = test
        .subcommand("extract")
        .args(["--apply", "--source-locale", "fr", "--registry-dir", "locales"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("locales/src/app.ts.fr.json").exists());
    Ok(())
}

#[test]
fn test_extract_nothing_to_add() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "const n = \"42\";\n")?;

    let output = test.subcommand("extract").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no new strings"));
    Ok(())
}
