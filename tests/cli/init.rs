use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, PLURAL_PHRASE, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["hashModule"], "tiger");
    assert_eq!(parsed["packager"], "text");
    assert_eq!(parsed["reactNativeMode"], false);
    assert!(
        parsed.get("terse").is_some(),
        "Config should have 'terse' field"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "\u{2713} Created .fbtrc.json\n"
    );

    assert!(test.root().join(".fbtrc.json").exists());
    let content = test.read_file(".fbtrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".fbtrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: .fbtrc.json already exists"));
    assert_eq!(test.read_file(".fbtrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test.pack_command().arg("phrases.json").output()?;
    assert!(
        output.status.success(),
        "Pack command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
