use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, entry, stderr, stdout};

const REGISTRY: &str = "i18n/src/app.ts.en.json";

fn setup() -> Result<CliTest> {
    let test = CliTest::with_file("src/app.ts", "T(\"Hello there\");\nT(\"Bye\");\n")?;
    test.write_file(
        REGISTRY,
        r#"[{"id": "Hello", "translation": "Hola"}, {"id": "Bye", "translation": "Adios"}]"#,
    )?;
    Ok(test)
}

#[test]
fn test_fixup_updated_string_keeps_translation() -> Result<()> {
    let test = setup()?;

    let output = CliTest::run_with_input(test.subcommand("fixup"), "u\n1\n")?;

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("\"Hello there\" is not in the registry"), "{}", out);
    assert!(out.contains("1) Hello"));
    assert!(out.contains("renamed Hello -> Hello there"));
    assert_eq!(
        test.read_registry(REGISTRY)?,
        vec![
            entry("Bye", "Adios", false),
            entry("Hello there", "Hola", true),
        ]
    );
    Ok(())
}

#[test]
fn test_fixup_new_string_removes_unused() -> Result<()> {
    let test = setup()?;

    let output = CliTest::run_with_input(test.subcommand("fixup"), "n\n")?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("added Hello there"));
    assert!(out.contains("removed Hello"));
    assert_eq!(
        test.read_registry(REGISTRY)?,
        vec![
            entry("Bye", "Adios", false),
            entry("Hello there", "Hello there", false),
        ]
    );
    Ok(())
}

#[test]
fn test_fixup_invalid_answer_asks_again() -> Result<()> {
    let test = setup()?;

    let output = CliTest::run_with_input(test.subcommand("fixup"), "maybe\nu\n7\n1\n")?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Invalid answer: \"maybe\""), "{}", out);
    assert!(out.contains("Invalid answer: \"7\""));
    assert_eq!(
        test.read_registry(REGISTRY)?,
        vec![
            entry("Bye", "Adios", false),
            entry("Hello there", "Hola", true),
        ]
    );
    Ok(())
}

#[test]
fn test_fixup_input_ended() -> Result<()> {
    let test = setup()?;
    let before = test.read_file(REGISTRY)?;

    let output = CliTest::run_with_input(test.subcommand("fixup"), "")?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Input ended"));
    assert_eq!(test.read_file(REGISTRY)?, before);
    Ok(())
}

#[test]
fn test_fixup_nothing_to_do() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "T(\"Bye\");\n")?;
    test.write_file(REGISTRY, r#"[{"id": "Bye", "translation": "Adios"}]"#)?;

    let output = CliTest::run_with_input(test.subcommand("fixup"), "")?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no registry changes needed"));
    Ok(())
}
