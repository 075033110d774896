use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .locscanrc.json

    ----- stderr -----
    ");

    let config: Value = serde_json::from_str(&test.read_file(".locscanrc.json")?)?;
    assert_eq!(config["sourceRoot"], "./ts");
    assert_eq!(config["localesRoot"], "./_locales");
    assert_eq!(config["masterLocale"], "en");
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locscanrc.json", r#"{ "masterLocale": "de" }"#)?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .locscanrc.json already exists
    ");
    assert_eq!(test.read_file(".locscanrc.json")?, r#"{ "masterLocale": "de" }"#);
    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(0));

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("1 of 3 key(s) used across 1 source file(s)"));
    Ok(())
}
