use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

#[test]
fn test_find_reports_every_usage() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "ts/menu.tsx",
        "const a = 1;\nconst label = <I18n token=\"greeting\" />;\n",
    )?;

    let output = test.run(&["find", "greeting"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Found 2 matches for token 'greeting':\n  --> ts/app.tsx:1\n  --> ts/menu.tsx:2\n"
    );
    Ok(())
}

#[test]
fn test_find_limit_truncates_output() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("ts/more.ts", "i18n('greeting')\n")?;

    let output = test.run(&["find", "greeting", "--limit", "1"])?;
    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("Found 2 matches for token 'greeting':\n"));
    assert!(stdout.contains("... and 1 more (use --limit 0 to show all)"));
    Ok(())
}

#[test]
fn test_find_without_matches_still_succeeds() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["find", "farewell"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✘ No matches found for token 'farewell'\n");
    Ok(())
}
