use anyhow::Result;
use serde_json::json;

use crate::{CliTest, run_with_stdin, stderr, stdout_json};

const TEXTS: &str = r#"[
  {"desc": "Cartoon character name", "texts": ["Sponge Bob", "Patrick"]},
  {"desc": "nothing", "texts": []}
]"#;

#[test]
fn test_hash_file() -> Result<()> {
    let test = CliTest::with_file("texts.json", TEXTS)?;

    let output = test.hash_command().arg("texts.json").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout_json(&output)?,
        json!([
            [
                "90ce1bd0f3ca22cb190ab5b0b112c796",
                "f840e34d0038cbf84af6e5ec62760449"
            ],
            []
        ])
    );

    Ok(())
}

#[test]
fn test_hash_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let output = run_with_stdin(
        test.hash_command(),
        r#"[{"desc": "Cartoon character name", "texts": ["Sponge Bob"]}]"#,
    )?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "[[\"90ce1bd0f3ca22cb190ab5b0b112c796\"]]\n"
    );

    Ok(())
}

#[test]
fn test_hash_rejects_malformed_input() -> Result<()> {
    let test = CliTest::with_file("texts.json", r#"{"desc": "d"}"#)?;

    let output = test.hash_command().arg("texts.json").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Expected a JSON list of {desc, texts}"));

    Ok(())
}
