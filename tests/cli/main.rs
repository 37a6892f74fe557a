use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod hash;
mod init;
mod pack;
mod shift;

const BIN_NAME: &str = "fbt-collect";

/// A plural phrase from `app.js`: `*` and `_1` variations sharing one description.
pub const PLURAL_PHRASE: &str = r#"{
  "filepath": "app.js", "line_beg": 1, "col_beg": 0, "line_end": 1, "col_end": 60,
  "desc": "photo count", "project": "",
  "jsfbt": {
    "t": {
      "*": {"desc": "photo count", "text": "{number} photos"},
      "_1": {"desc": "photo count", "text": "1 photo"}
    },
    "m": [{"token": "number", "type": 2, "singular": true}]
  }
}"#;

/// A two-key enum nested under a plural.
pub const ENUM_PHRASE: &str = r#"{
  "filepath": "app.js", "line_beg": 5, "col_beg": 2, "line_end": 5, "col_end": 80,
  "desc": "things", "project": "",
  "jsfbt": {
    "t": {
      "_1": {
        "photos": {"desc": "things", "text": "A"},
        "posts": {"desc": "things", "text": "B"}
      },
      "*": {
        "photos": {"desc": "things", "text": "C"},
        "posts": {"desc": "things", "text": "D"}
      }
    },
    "m": [{"token": "num", "type": 2}, {"range": ["photos", "posts"]}]
  }
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config lookup at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn pack_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("pack");
        cmd
    }

    pub fn shift_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("shift");
        cmd
    }

    pub fn hash_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("hash");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Run `cmd` with `input` on stdin.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .context("stdin should be piped")?
        .write_all(input.as_bytes())?;
    Ok(child.wait_with_output()?)
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).with_context(|| {
        format!(
            "stdout should be JSON. stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
