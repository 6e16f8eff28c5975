use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, entry, stdout};

const REGISTRY: &str = "i18n/src/app.ts.en.json";

fn setup(test: &CliTest, source: &str, registry: Option<&str>) -> Result<()> {
    test.write_file(".intlwraprc.json", r#"{ "includes": ["src"] }"#)?;
    test.write_file("src/app.ts", source)?;
    if let Some(registry) = registry {
        test.write_file(REGISTRY, registry)?;
    }
    Ok(())
}

#[test]
fn test_rewrite_dry_run_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    let source = "const greeting = \"Hello\";\nconst other = \"Bye\";\n";
    setup(
        &test,
        source,
        Some(r#"[{"id": "Hello", "translation": "Hola"}]"#),
    )?;

    let output = test.subcommand("rewrite").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Would wrap 1 literal in 1 file"), "{}", out);
    assert!(out.contains("--apply"));
    assert_eq!(test.read_file("src/app.ts")?, source);
    Ok(())
}

#[test]
fn test_rewrite_apply_wraps_listed_strings() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        "const greeting = \"Hello\";\nconst other = \"Bye\";\n",
        Some(r#"[{"id": "Hello", "translation": "Hola"}]"#),
    )?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Wrapped 1 literal"));
    assert_eq!(
        test.read_file("src/app.ts")?,
        "const greeting = T(\"Hello\");\nconst other = \"Bye\";\n"
    );
    // Nothing renamed, so the registry is left as written.
    assert_eq!(
        test.read_file(REGISTRY)?,
        r#"[{"id": "Hello", "translation": "Hola"}]"#
    );
    Ok(())
}

#[test]
fn test_rewrite_apply_renames_interpolated_string() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        "fmt(\"Hello %s\", name);\n",
        Some(r#"[{"id": "Hello %s", "translation": "Hola %s"}]"#),
    )?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/app.ts")?,
        "fmt(T(\"Hello {{.Arg0}}\", { \"Arg0\": name }));\n"
    );
    assert_eq!(
        test.read_registry(REGISTRY)?,
        vec![entry("Hello {{.Arg0}}", "Hola {{.Arg0}}", false)]
    );
    Ok(())
}

#[test]
fn test_rewrite_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        "fmt(\"Hello %s\", name);\nlet x = \"Bye\";\n",
        Some(r#"[{"id": "Hello %s", "translation": "Hola %s"}, {"id": "Bye", "translation": "Adios"}]"#),
    )?;

    test.subcommand("rewrite").arg("--apply").output()?;
    let first = test.read_file("src/app.ts")?;

    let output = test.subcommand("rewrite").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no literals to wrap"));
    assert_eq!(test.read_file("src/app.ts")?, first);
    Ok(())
}

#[test]
fn test_rewrite_without_registry_is_skipped() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, "let x = \"Hello\";\n", None)?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("1 file without a registry was skipped"));
    assert_eq!(test.read_file("src/app.ts")?, "let x = \"Hello\";\n");
    assert!(!test.root().join(REGISTRY).exists());
    Ok(())
}

#[test]
fn test_rewrite_all_records_strings() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, "console.log(\"Hello\", name);\nlet e = \"\";\n", None)?;

    let output = test
        .subcommand("rewrite")
        .args(["--all", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/app.ts")?,
        "console.log(T(\"Hello\"), name);\nlet e = \"\";\n"
    );
    assert_eq!(
        test.read_registry(REGISTRY)?,
        vec![entry("Hello", "Hello", false)]
    );
    Ok(())
}

#[test]
fn test_rewrite_with_shared_registry() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlwraprc.json", r#"{ "includes": ["src"] }"#)?;
    test.write_file("src/a.ts", "let a = \"Save\";\n")?;
    test.write_file("src/b.ts", "let b = \"Save\";\nlet c = \"Other\";\n")?;
    test.write_file("strings.json", r#"[{"id": "Save", "translation": "Guardar"}]"#)?;

    let output = test
        .subcommand("rewrite")
        .args(["--registry", "strings.json", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("src/a.ts")?, "let a = T(\"Save\");\n");
    assert_eq!(
        test.read_file("src/b.ts")?,
        "let b = T(\"Save\");\nlet c = \"Other\";\n"
    );
    Ok(())
}

#[test]
fn test_rewrite_shared_registry_interpolated_in_two_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlwraprc.json", r#"{ "includes": ["src"] }"#)?;
    test.write_file("src/a.ts", "f(\"Hello %s\", x);\n")?;
    test.write_file("src/b.ts", "f(\"Hello %s\", y);\n")?;
    test.write_file(
        "strings.json",
        r#"[{"id": "Hello %s", "translation": "Hola %s"}]"#,
    )?;

    let dry_run = test
        .subcommand("rewrite")
        .args(["--registry", "strings.json"])
        .output()?;
    assert_eq!(dry_run.status.code(), Some(1));
    assert!(
        stdout(&dry_run).contains("Would wrap 2 literals in 2 files (1 registry file updated).")
    );

    let output = test
        .subcommand("rewrite")
        .args(["--registry", "strings.json", "--apply"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout(&output).contains("Wrapped 2 literals in 2 files (1 registry file updated).")
    );
    assert_eq!(
        test.read_file("src/a.ts")?,
        "f(T(\"Hello {{.Arg0}}\", { \"Arg0\": x }));\n"
    );
    assert_eq!(
        test.read_file("src/b.ts")?,
        "f(T(\"Hello {{.Arg0}}\", { \"Arg0\": y }));\n"
    );
    assert_eq!(
        test.read_registry("strings.json")?,
        vec![entry("Hello {{.Arg0}}", "Hola {{.Arg0}}", false)]
    );
    Ok(())
}

#[test]
fn test_rewrite_adds_import() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlwraprc.json",
        r#"{ "includes": ["src"], "importSource": "@/i18n" }"#,
    )?;
    test.write_file("src/app.ts", "import x from \"x\";\nlet a = \"Hi\";\n")?;
    test.write_file(REGISTRY, r#"[{"id": "Hi", "translation": "Salut"}]"#)?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/app.ts")?,
        "import x from \"x\";\nimport { T } from \"@/i18n\";\nlet a = T(\"Hi\");\n"
    );
    Ok(())
}

#[test]
fn test_rewrite_reports_format_mismatch() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        "fmt(\"%s and %s\", a);\n",
        Some(r#"[{"id": "%s and %s", "translation": "%s y %s"}]"#),
    )?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("warning:"), "{}", out);
    assert!(out.contains("format-mismatch"));
    assert!(out.contains("src/app.ts:1:5"));
    assert_eq!(test.read_file("src/app.ts")?, "fmt(\"%s and %s\", a);\n");
    Ok(())
}

#[test]
fn test_rewrite_parse_error_leaves_file() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        "let x = \"Hello\";\nlet y = (;\n",
        Some(r#"[{"id": "Hello", "translation": "Hola"}]"#),
    )?;

    let output = test.subcommand("rewrite").arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("parse-error"));
    assert_eq!(test.read_file("src/app.ts")?, "let x = \"Hello\";\nlet y = (;\n");
    Ok(())
}

#[test]
fn test_rewrite_missing_shared_registry_fails() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", "let x = \"Hello\";\n")?;

    let output = test
        .subcommand("rewrite")
        .args(["--registry", "missing.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("Registry file not found"));
    Ok(())
}
