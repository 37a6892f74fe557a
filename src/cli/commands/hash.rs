use anyhow::{Context, Result};

use super::{load_current_config, print_json, read_input};
use crate::cli::args::HashCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report::print_note;
use crate::hash::{PhraseTexts, hash_phrases};

pub fn hash(cmd: HashCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let config = load_current_config(verbose)?;
    let pretty = cmd.common.pretty || config.pretty;

    let source = read_input(cmd.file.as_deref())?;
    let phrases: Vec<PhraseTexts> =
        serde_json::from_str(&source).context("Expected a JSON list of {desc, texts}")?;
    print_note(&format!("Hashing {} phrase(s)", phrases.len()), verbose);

    print_json(&hash_phrases(&phrases), pretty)?;
    Ok(ExitStatus::Success)
}
