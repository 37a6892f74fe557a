use anyhow::Result;
use serde_json::json;

use crate::{CliTest, ENUM_PHRASE, PLURAL_PHRASE, run_with_stdin, stderr, stdout_json};

#[test]
fn test_pack_text_hashes_with_tiger() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test.pack_command().arg("phrases.json").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let json = stdout_json(&output)?;
    assert_eq!(
        json["phrases"][0]["hashToLeaf"],
        json!({
            "0f1c46df8934582b37004d9d7f155c02": {"text": "{number} photos", "desc": "photo count"},
            "15227483474bb4d3a9d669989663acfc": {"text": "1 photo", "desc": "photo count"}
        })
    );
    assert!(json["phrases"][0].get("hash_key").is_none());
    assert_eq!(json["childParentMappings"], json!({}));

    Ok(())
}

#[test]
fn test_pack_phrase_packager() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test
        .pack_command()
        .args(["phrases.json", "--packager", "phrase"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = stdout_json(&output)?;
    assert_eq!(json["phrases"][0]["hash_key"], json!("aCYrt"));
    assert_eq!(json["phrases"][0]["hash_code"], json!(157052167));
    assert!(json["phrases"][0].get("hashToLeaf").is_none());

    Ok(())
}

#[test]
fn test_pack_output_field_order() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test
        .pack_command()
        .args(["phrases.json", "--packager", "both", "--hash-module", "jenkins", "--terse"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        String::from_utf8(output.stdout)?,
        concat!(
            r#"{"phrases":[{"hash_key":"aCYrt","hash_code":157052167,"#,
            r#""hashToLeaf":{"35DMQr":{"text":"{number} photos","desc":"photo count"},"#,
            r#""45V6fd":{"text":"1 photo","desc":"photo count"}},"#,
            r#""filepath":"app.js","line_beg":1,"col_beg":0,"line_end":1,"col_end":60,"#,
            r#""desc":"photo count","project":""}],"childParentMappings":{}}"#,
            "\n"
        )
    );

    Ok(())
}

#[test]
fn test_pack_react_native_mode_flattens_enums() -> Result<()> {
    let test = CliTest::with_file(
        "phrases.json",
        &format!(
            r#"{{"phrases": [{}, {}], "childParentMappings": {{"1": 0}}}}"#,
            ENUM_PHRASE, PLURAL_PHRASE
        ),
    )?;

    let output = test
        .pack_command()
        .args(["phrases.json", "--react-native-mode", "--packager", "none"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = stdout_json(&output)?;
    let phrases = json["phrases"].as_array().expect("phrases should be a list");
    assert_eq!(phrases.len(), 3);
    assert_eq!(
        phrases[0]["jsfbt"],
        json!({
            "t": {
                "_1": {"desc": "things", "text": "A"},
                "*": {"desc": "things", "text": "C"}
            },
            "m": [{"token": "num", "type": 2}]
        })
    );
    assert_eq!(phrases[1]["jsfbt"]["t"]["_1"]["text"], json!("B"));
    assert_eq!(json["childParentMappings"], json!({"2": 0}));

    Ok(())
}

#[test]
fn test_pack_output_can_be_packed_again() -> Result<()> {
    let test = CliTest::with_file(
        "phrases.json",
        &format!(
            r#"{{"phrases": [{}, {}], "childParentMappings": {{"1": 0}}}}"#,
            PLURAL_PHRASE, PLURAL_PHRASE
        ),
    )?;

    let first = test
        .pack_command()
        .args(["phrases.json", "--packager", "none"])
        .output()?;
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    test.write_file("packed.json", &String::from_utf8(first.stdout.clone())?)?;

    let second = test
        .pack_command()
        .args(["packed.json", "--packager", "none"])
        .output()?;
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    assert_eq!(stdout_json(&second)?, stdout_json(&first)?);
    assert_eq!(stdout_json(&second)?["childParentMappings"], json!({"1": 0}));

    Ok(())
}

#[test]
fn test_pack_reads_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let output = run_with_stdin(test.pack_command(), &format!("[{}]", PLURAL_PHRASE))?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout_json(&output)?["phrases"].as_array().map(Vec::len), Some(1));

    Ok(())
}

#[test]
fn test_pack_config_file_settings() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;
    test.write_file(
        ".fbtrc.json",
        r#"{ "hashModule": "jenkins", "packager": "text", "terse": true }"#,
    )?;

    let output = test.pack_command().arg("phrases.json").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = stdout_json(&output)?;
    assert!(json["phrases"][0]["hashToLeaf"].get("35DMQr").is_some());
    assert!(json["phrases"][0].get("jsfbt").is_none());

    Ok(())
}

#[test]
fn test_pack_failed_file_is_reported_and_others_kept() -> Result<()> {
    let test = CliTest::with_file("good.json", &format!("[{}]", PLURAL_PHRASE))?;
    test.write_file("bad.json", "{ not json")?;

    let output = test.pack_command().args(["good.json", "bad.json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output)?;
    assert_eq!(json["phrases"].as_array().map(Vec::len), Some(1));

    let stderr = stderr(&output);
    assert!(stderr.contains(r#"error: [file="bad.json"]"#), "stderr: {}", stderr);
    assert!(stderr.contains("error: Failed in 1 file(s)."), "stderr: {}", stderr);

    Ok(())
}

#[test]
fn test_pack_md5_hash_module() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test
        .pack_command()
        .args(["phrases.json", "--hash-module", "md5"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout_json(&output)?["phrases"][0]["hashToLeaf"],
        json!({
            "fBf+KFqgfGaM9stTGV6prA==": {"text": "{number} photos", "desc": "photo count"},
            "gzyYr/uA3Ab4Ee30IdjLow==": {"text": "1 photo", "desc": "photo count"}
        })
    );

    Ok(())
}

#[test]
fn test_pack_unknown_hash_module_is_an_error() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test
        .pack_command()
        .args(["phrases.json", "--hash-module", "sha1"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Unsupported hash module `sha1`"));

    Ok(())
}

#[test]
fn test_pack_verbose_notes() -> Result<()> {
    let test = CliTest::with_file("phrases.json", &format!("[{}]", PLURAL_PHRASE))?;

    let output = test.pack_command().args(["phrases.json", "-v"]).output()?;
    assert!(output.status.success());

    let stderr = stderr(&output);
    assert!(stderr.contains("No .fbtrc.json found, using default configuration"));
    assert!(stderr.contains("Collected 1 phrase(s) from 1 input"));

    Ok(())
}
