use anyhow::Result;
use serde_json::json;

use crate::{CliTest, ENUM_PHRASE, PLURAL_PHRASE, stderr, stdout_json};

#[test]
fn test_shift_moves_enums_to_top() -> Result<()> {
    let test = CliTest::with_file(
        "phrases.json",
        &format!("[{}, {}]", ENUM_PHRASE, PLURAL_PHRASE),
    )?;

    let output = test.shift_command().arg("phrases.json").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = stdout_json(&output)?;
    assert_eq!(json[0]["enumCount"], json!(1));
    assert_eq!(
        json[0]["shiftedJsfbt"]["photos"],
        json!({
            "_1": {"desc": "things", "text": "A"},
            "*": {"desc": "things", "text": "C"}
        })
    );
    assert_eq!(json[0]["shiftedJsfbt"]["posts"]["*"]["text"], json!("D"));
    assert_eq!(json[1]["enumCount"], json!(0));
    assert_eq!(json[1]["shiftedJsfbt"]["_1"]["text"], json!("1 photo"));

    Ok(())
}

#[test]
fn test_shift_pretty_output() -> Result<()> {
    let test = CliTest::with_file(
        "phrases.json",
        r#"[{"desc": "d", "jsfbt": {"t": {"desc": "d", "text": "Hi"}, "m": []}}]"#,
    )?;

    let output = test
        .shift_command()
        .args(["phrases.json", "--pretty"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "[\n {\n  \"shiftedJsfbt\": {\n   \"desc\": \"d\",\n   \"text\": \"Hi\"\n  },\n  \"enumCount\": 0\n }\n]\n"
    );

    Ok(())
}

const MISSING_ENUM_KEY: &str = r#"[{"filepath": "x.js", "line_beg": 7, "col_beg": 3, "desc": "d", "jsfbt": {
    "t": {"a": {"desc": "d", "text": "A"}},
    "m": [{"range": ["a", "b"]}]
}}]"#;

#[test]
fn test_shift_table_missing_an_enum_key_fails() -> Result<()> {
    let test = CliTest::with_file("phrases.json", MISSING_ENUM_KEY)?;

    let output = test.shift_command().arg("phrases.json").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout.clone())?, "[]\n");
    let stderr = stderr(&output);
    assert!(stderr.contains(r#"error: [file="x.js"]"#), "stderr: {}", stderr);
    assert!(stderr.contains("x.js:7:3"), "stderr: {}", stderr);
    assert!(stderr.contains("enum key `b` is missing"), "stderr: {}", stderr);
    assert!(stderr.contains("error: Failed to shift 1 phrase(s)."), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_shift_keeps_good_files_when_one_fails() -> Result<()> {
    let test = CliTest::with_file("good.json", &format!("[{}]", PLURAL_PHRASE))?;
    test.write_file("bad.json", MISSING_ENUM_KEY)?;

    let output = test
        .shift_command()
        .args(["good.json", "bad.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output)?;
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["shiftedJsfbt"]["_1"]["text"], json!("1 photo"));
    assert!(stderr(&output).contains("x.js:7:3"));

    Ok(())
}
