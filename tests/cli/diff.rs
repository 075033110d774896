use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stdout};

const PROBLEMS_FILE: &str = "tools/localization/output/problems.json";

fn diff_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{ "greeting": "Hello {name}", "bold": "<b>Hi</b>" }"#,
    )?;
    test.write_file(
        "_locales/fr/messages.json",
        r#"{ "greeting": "Bonjour", "bold": "Salut", "extra": "En trop" }"#,
    )?;
    Ok(test)
}

#[test]
fn test_diff_reports_problems_without_failing() -> Result<()> {
    let test = diff_project()?;

    let output = test.run(&["diff"])?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout(&output);
    assert!(stdout.contains("✘ 3 problems in 1 of 1 locale(s)"));
    assert!(stdout.contains("Run with --print-problems or --write-problems to see the problems."));
    assert!(!test.root().join(PROBLEMS_FILE).exists());
    Ok(())
}

#[test]
fn test_diff_error_on_problems() -> Result<()> {
    let test = diff_project()?;

    let output = test.run(&["diff", "--error-on-problems"])?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_diff_write_problems() -> Result<()> {
    let test = diff_project()?;

    let output = test.run(&["diff", "--write-problems"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(&format!("Problems written to ./{PROBLEMS_FILE}")));

    let problems: Value = serde_json::from_str(&test.read_file(PROBLEMS_FILE)?)?;
    assert_eq!(
        problems,
        json!({
            "fr": {
                "additional_keys": ["extra"],
                "missing_variables": { "greeting": ["name"] },
                "missing_b_tags": { "bold": 1 }
            }
        })
    );
    Ok(())
}

#[test]
fn test_diff_print_problems_table() -> Result<()> {
    let test = diff_project()?;

    assert_cmd_snapshot!(test.command().args(["diff", "--print-problems"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ------------------------------------------------------------

    + Keys: Keys present in the master locale but missing in the locale
    - Keys: Keys present in the locale but missing in the master locale
    - Vars: Dynamic variables present in the master locale but missing in the locale
    + Vars: Dynamic variables present in the locale but missing in the master locale
    Tags:   Keys with formatting tag differences or malformed markup

    Locale    + Keys    - Keys    - Vars    + Vars    Tags
    ------------------------------------------------------------
    fr        0         1         1         0         1

    ✘ 3 problems in 1 of 1 locale(s)

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_diff_clean_locales() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["diff", "--error-on-problems", "--write-problems"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("✓ Compared 1 locale(s) against en - no problems found"));
    assert!(!test.root().join(PROBLEMS_FILE).exists());
    Ok(())
}

#[test]
fn test_diff_old_dynamic_variables() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("_locales/en/messages.json", r#"{ "welcome": "Hi $name$" }"#)?;

    let output = test.run(&["diff"])?;
    assert_eq!(output.status.code(), Some(0));
    let stdout_text = stdout(&output);
    assert!(stdout_text.contains("warning: Locale en contains 1 strings with old dynamic variables."));
    assert!(stdout_text.contains("Run with --print-old-dynamic-variables to see them."));

    let output = test.run(&["diff", "--error-old-dynamic-variables"])?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_diff_skips_unreadable_locale() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("_locales/de/messages.json", "{ not json")?;

    let output = test.run(&["diff"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("warning: locale de was not compared"));

    let output = test.run(&["diff", "--error-on-problems"])?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_diff_json_format() -> Result<()> {
    let test = diff_project()?;

    let output = test.run(&["diff", "--format", "json"])?;
    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["master_locale"], "en");
    assert_eq!(report["locales_compared"], 1);
    assert_eq!(report["problems"]["fr"]["additional_keys"], json!(["extra"]));
    assert_eq!(report["skipped_locales"], json!([]));
    Ok(())
}

#[test]
fn test_diff_generate_types() -> Result<()> {
    let test = diff_project()?;

    let output = test.run(&["diff", "--generate-types"])?;
    assert_eq!(output.status.code(), Some(0));
    let module = test.read_file("ts/localization/locales.ts")?;
    assert!(module.contains("export const dictionary = {"));
    assert!(stdout(&output).contains("Generated ./ts/localization/locales.ts (2 keys, 2 locale(s))"));
    Ok(())
}

#[test]
fn test_diff_xml_dictionaries() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locscanrc.json", r#"{ "dictionaryFile": "strings.xml" }"#)?;
    test.write_file(
        "_locales/en/strings.xml",
        "<resources>\n  <string name=\"greeting\">Hello {name}</string>\n</resources>\n",
    )?;
    test.write_file(
        "_locales/fr/strings.xml",
        "<resources>\n  <string name=\"greeting\">Bonjour</string>\n</resources>\n",
    )?;

    let output = test.run(&["diff", "--format", "json"])?;
    assert_eq!(output.status.code(), Some(0));
    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        report["problems"]["fr"]["missing_variables"],
        json!({ "greeting": ["name"] })
    );
    Ok(())
}
