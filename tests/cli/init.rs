use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.subcommand("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .intlwraprc.json"));

    let content = test.read_file(".intlwraprc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["registryDir"], "./i18n");
    assert_eq!(parsed["sourceLocale"], "en");
    assert_eq!(parsed["translateFunction"], "T");
    assert!(parsed.get("importSource").is_none());
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlwraprc.json", "{}")?;

    let output = test.subcommand("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(test.read_file(".intlwraprc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.subcommand("init").output()?;
    test.write_file("src/app.ts", "export const a = T(\"Hi\");\n")?;
    test.write_file(
        "i18n/src/app.ts.en.json",
        r#"[{"id": "Hi", "translation": "Salut"}]"#,
    )?;

    let output = test.subcommand("checkup").output()?;
    assert!(
        output.status.success(),
        "Checkup should work with initialized config. stdout: {}",
        stdout(&output)
    );

    Ok(())
}
