use anyhow::{Context, Result};

use super::{collect_inputs, load_current_config, print_json};
use crate::cli::args::PackCommand;
use crate::cli::exit_status::ExitStatus;
use crate::collect::Collector;
use crate::hash::HashModule;

pub fn pack(cmd: PackCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let config = load_current_config(verbose)?;

    let hash_module = match &cmd.hash_module {
        Some(name) => name
            .parse::<HashModule>()
            .context("Invalid value for '--hash-module'")?,
        None => config.hash_module()?,
    };
    let packager = cmd.packager.unwrap_or(config.packager);
    let react_native_mode = cmd.react_native_mode || config.react_native_mode;
    let terse = cmd.terse || config.terse;
    let pretty = cmd.common.pretty || config.pretty;

    let mut collector = Collector::new(react_native_mode);
    let failed = collect_inputs(&mut collector, &cmd.files, verbose)?;

    let (output, _) = collector.into_output(packager, &hash_module, terse);
    print_json(&output, pretty)?;

    Ok(ExitStatus::from_failed_files(failed))
}
