use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const MODULE_PATH: &str = "ts/localization/locales.ts";

#[test]
fn test_generate_master_module() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "✓ Generated ./ts/localization/locales.ts (3 keys, 1 locale(s))\n"
    );

    let module = test.read_file(MODULE_PATH)?;
    assert!(module.starts_with(
        "\n// This file was generated by a script. Do not modify this file manually.\n"
    ));
    assert!(module.contains("export const en = {\n  greeting: 'Hello {name}',\n"));
    assert!(module.ends_with("export type Dictionary = typeof en;\n"));
    Ok(())
}

#[test]
fn test_generate_merged_module() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("_locales/pt-BR/messages.json", r#"{ "greeting": "Olá {name}" }"#)?;

    let output = test.run(&["generate", "--merged"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("(3 keys, 3 locale(s))"));

    let module = test.read_file(MODULE_PATH)?;
    assert!(module.contains("export const dictionary = {"));
    assert!(module.contains(
        "  greeting: {\n      en: \"Hello {name}\",\n      fr: \"Bonjour {name}\",\n      pt_BR: \"Olá {name}\",\n      args: {name: \"string\"} as const,\n  },\n"
    ));
    // Missing translations fall back to the master value.
    assert!(module.contains("      pt_BR: \"Goodbye\",\n"));
    Ok(())
}

#[test]
fn test_generate_static_replacements() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".locscanrc.json",
        r#"{ "staticReplacements": { "{app_name}": "Session" } }"#,
    )?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{ "about": "About {app_name}" }"#,
    )?;

    let output = test.run(&["generate", "--merged", "--output", "out/strings.ts"])?;
    assert_eq!(output.status.code(), Some(0));
    let module = test.read_file("out/strings.ts")?;
    assert!(module.contains("en: \"About Session\""));
    Ok(())
}

#[test]
fn test_generate_without_locales_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["generate"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join(MODULE_PATH).exists());
    Ok(())
}
