use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

#[test]
fn test_checkup_clean() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "T(\"Hello\");\n")?;
    test.write_file(
        "i18n/src/app.ts.en.json",
        r#"[{"id": "Hello", "translation": "Hola"}]"#,
    )?;

    let output = test.subcommand("checkup").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 1 source file - no issues found"));
    Ok(())
}

#[test]
fn test_checkup_reports_missing_and_unused() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "T(\"Hello\");\nT(\"Missing\");\n")?;
    test.write_file(
        "i18n/src/app.ts.en.json",
        r#"[{"id": "Hello", "translation": "Hola"}, {"id": "Stale", "translation": "Viejo"}]"#,
    )?;

    let output = test.subcommand("checkup").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: \"Missing\"  missing-string"), "{}", out);
    assert!(out.contains("src/app.ts:2:3"));
    assert!(out.contains("warning: \"Stale\"  unused-string"));
    assert!(out.contains("2 problems (1 error, 1 warning)"));
    Ok(())
}

#[test]
fn test_checkup_without_registry_reports_every_call() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "T(\"Hello\");\nlet x = \"plain\";\n")?;

    let output = test.subcommand("checkup").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("\"Hello\"  missing-string"));
    Ok(())
}

#[test]
fn test_checkup_custom_translate_function() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "i18n.t(\"Hello\");\nT(\"Other\");\n")?;
    test.write_file(".intlwraprc.json", r#"{ "translateFunction": "i18n.t" }"#)?;
    test.write_file(
        "i18n/src/app.ts.en.json",
        r#"[{"id": "Hello", "translation": "Hola"}]"#,
    )?;

    let output = test.subcommand("checkup").output()?;

    assert_eq!(output.status.code(), Some(0));
    Ok(())
}
