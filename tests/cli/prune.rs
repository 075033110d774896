use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, EN_MESSAGES, FR_MESSAGES, stdout};

fn read_json(test: &CliTest, path: &str) -> Result<Value> {
    Ok(serde_json::from_str(&test.read_file(path)?)?)
}

#[test]
fn test_prune_dry_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["prune"])?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout(&output);
    assert!(stdout.contains("_locales/en/messages.json\n  - farewell\n  - unused\n"));
    assert!(stdout.contains("_locales/fr/messages.json\n  - farewell\n  - unused\n"));
    assert!(stdout.contains("Would delete 4 key(s) in 2 file(s)."));
    assert!(stdout.contains("Run with --apply to delete these keys."));

    assert_eq!(test.read_file("_locales/en/messages.json")?, EN_MESSAGES);
    assert_eq!(test.read_file("_locales/fr/messages.json")?, FR_MESSAGES);
    Ok(())
}

#[test]
fn test_prune_apply_deletes_unused_keys() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["prune", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Deleted 4 key(s) in 2 file(s) (processed 2 unused key(s))."));

    assert_eq!(
        read_json(&test, "_locales/en/messages.json")?,
        json!({ "greeting": "Hello {name}" })
    );
    assert_eq!(
        read_json(&test, "_locales/fr/messages.json")?,
        json!({ "greeting": "Bonjour {name}" })
    );

    let output = test.run(&["prune", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ No unused keys found\n");
    Ok(())
}

#[test]
fn test_prune_keeps_intentionally_unused_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(".locscanrc.json", r#"{ "intentionallyUnused": ["unused"] }"#)?;

    let output = test.run(&["prune", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        read_json(&test, "_locales/en/messages.json")?,
        json!({ "greeting": "Hello {name}", "unused": "Never used" })
    );
    Ok(())
}

#[test]
fn test_prune_nested_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "_locales/en/messages.json",
        r#"{ "menu": { "open": "Open", "close": "Close" }, "old": { "title": "Old" } }"#,
    )?;
    test.write_file("ts/menu.ts", "i18n('menu.open')\n")?;

    let output = test.run(&["prune", "--apply"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        read_json(&test, "_locales/en/messages.json")?,
        json!({ "menu": { "open": "Open" } })
    );
    Ok(())
}

#[test]
fn test_prune_warns_about_unloaded_locales() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("_locales/de/messages.json", "{ broken")?;

    let output = test.run(&["prune"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(
        crate::stderr(&output).contains("locale de was not loaded and will not be pruned")
    );
    Ok(())
}
