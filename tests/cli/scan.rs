use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const ANALYSIS_DIR: &str = "tools/localization/analysis";

#[test]
fn test_scan_writes_analysis_files() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout(&output);
    assert!(stdout.contains("1 of 3 key(s) used across 1 source file(s)"));
    assert!(stdout.contains("2 key(s) not found:"));
    assert!(stdout.contains("farewell (potential: ts/app.tsx:2)"));

    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/found_strings.csv"))?,
        "String,Phrase,Locations\ngreeting,Hello {name},\n"
    );
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/not_found_strings.txt"))?,
        "farewell\nunused\n"
    );
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/potential_matches.csv"))?,
        "String,Potential File Matches\nfarewell,ts/app.tsx:2\n"
    );
    Ok(())
}

#[test]
fn test_scan_detail_records_locations() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["scan", "--detail"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/found_strings.csv"))?,
        "String,Phrase,Locations\ngreeting,Hello {name},ts/app.tsx:1\n"
    );
    Ok(())
}

#[test]
fn test_scan_missing_master_list_skips_comparison() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(&format!("{ANALYSIS_DIR}/not_in_master_list.csv"), "stale\n")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Master string list not found at"));
    assert!(
        !test
            .root()
            .join(ANALYSIS_DIR)
            .join("not_in_master_list.csv")
            .exists()
    );
    Ok(())
}

#[test]
fn test_scan_compares_against_master_list() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("tools/localization/input/master_string_list.txt", "farewell\n")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("1 used key(s) are not in the master string list"));
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/not_in_master_list.csv"))?,
        "String,Phrase,Locations\ngreeting,Hello {name},\n"
    );
    Ok(())
}

#[test]
fn test_scan_to_be_removed_list_excludes_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("tools/localization/input/master_string_list.txt", "farewell\n")?;
    test.write_file("tools/localization/input/to_be_removed_list.txt", "greeting\n")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/not_in_master_list.csv"))?,
        "String,Phrase,Locations\n"
    );
    Ok(())
}

#[test]
fn test_scan_intentionally_unused_keys_are_skipped() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(".locscanrc.json", r#"{ "intentionallyUnused": ["unused"] }"#)?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Skipped 1 intentionally unused key(s)."));
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/not_found_strings.txt"))?,
        "farewell\n"
    );
    Ok(())
}

#[test]
fn test_scan_custom_call_pattern() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        ".locscanrc.json",
        r#"{ "callPatterns": [{ "name": "tr", "pattern": "tr\\('{key}'\\)" }] }"#,
    )?;
    test.write_file("ts/other.ts", "export const bye = tr('farewell');\n")?;

    let output = test.run(&["scan", "--format", "json"])?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["not_found"], serde_json::json!(["unused"]));
    assert_eq!(report["files_scanned"], 2);
    assert!(report["found"].get("farewell").is_some());
    Ok(())
}

#[test]
fn test_scan_ignores_configured_files() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("ts/LocalizerKeys.ts", "i18n('farewell')\ni18n('unused')\n")?;

    let output = test.run(&["scan", "--format", "json"])?;
    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["not_found"], serde_json::json!(["farewell", "unused"]));
    Ok(())
}

#[test]
fn test_scan_missing_master_locale_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("_locales/fr/messages.json", "{}")?;
    test.write_file("ts/app.ts", "")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(!test.root().join(ANALYSIS_DIR).exists());
    Ok(())
}

#[test]
fn test_scan_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(".locscanrc.json", r#"{ "extensions": [] }"#)?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_scan_master_locale_override() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("_locales/de/messages.json", r#"{ "greeting": "Hallo {name}" }"#)?;

    let output = test.run(&["scan", "--master-locale", "de", "--format", "json"])?;
    assert_eq!(output.status.code(), Some(0));
    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["not_found"], serde_json::json!([]));
    Ok(())
}

#[test]
fn test_scan_unreadable_master_list_writes_nothing() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(&format!("{ANALYSIS_DIR}/not_found_strings.txt"), "previous\n")?;
    let list_dir = test.root().join("tools/localization/input");
    std::fs::create_dir_all(&list_dir)?;
    std::fs::write(list_dir.join("master_string_list.txt"), [0xff, 0xfe, b'\n'])?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join(ANALYSIS_DIR).join("found_strings.csv").exists());
    assert_eq!(
        test.read_file(&format!("{ANALYSIS_DIR}/not_found_strings.txt"))?,
        "previous\n"
    );
    Ok(())
}
