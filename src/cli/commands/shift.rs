use anyhow::Result;
use rayon::prelude::*;

use super::{collect_inputs, load_current_config, print_json};
use crate::cli::args::ShiftCommand;
use crate::cli::exit_status::ExitStatus;
use crate::cli::report::print_shift_errors;
use crate::collect::{CollectError, Collector};
use crate::core::{Phrase, ShiftedTable, shift_enums_to_top};

pub fn shift(cmd: ShiftCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let config = load_current_config(verbose)?;
    let pretty = cmd.common.pretty || config.pretty;

    let mut collector = Collector::new(false);
    let failed_files = collect_inputs(&mut collector, &cmd.files, verbose)?;

    let (shifted, errors) = shift_phrases(collector.phrases());
    print_shift_errors(&errors);
    print_json(&shifted, pretty)?;

    Ok(ExitStatus::from_failed_files(failed_files + errors.len()))
}

/// Shift every phrase on its own; a phrase that fails is recorded and left out.
fn shift_phrases(phrases: &[Phrase]) -> (Vec<ShiftedTable>, Vec<CollectError>) {
    let results: Vec<_> = phrases
        .par_iter()
        .map(|phrase| (phrase, shift_enums_to_top(&phrase.jsfbt)))
        .collect();

    let mut shifted = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for (phrase, result) in results {
        match result {
            Ok(table) => shifted.push(table),
            Err(error) => {
                let file = phrase.filepath.as_deref().unwrap_or("<stdin>");
                errors.push(CollectError {
                    file: file.to_string(),
                    error: anyhow::Error::new(error).context(format!(
                        "Failed to shift enums of the phrase at {}:{}:{}",
                        file, phrase.line_beg, phrase.col_beg
                    )),
                });
            }
        }
    }
    (shifted, errors)
}
