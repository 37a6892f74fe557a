pub mod hash;
pub mod init;
pub mod pack;
pub mod shift;

use std::{
    env, fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::report::{print_collected, print_collect_errors, print_note};
use crate::collect::Collector;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};

/// Configuration for the current directory, announcing defaults in verbose mode.
fn load_current_config(verbose: bool) -> Result<Config> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&current_dir)?;
    if !loaded.from_file {
        print_note(
            &format!("No {} found, using default configuration", CONFIG_FILE_NAME),
            verbose,
        );
    }
    Ok(loaded.config)
}

/// Collect `files`, or stdin when there are none. Failed files are reported on stderr and
/// returned as a count.
fn collect_inputs(collector: &mut Collector, files: &[PathBuf], verbose: bool) -> Result<usize> {
    let inputs = if files.is_empty() {
        let source = read_input(None)?;
        collector
            .collect_from_source(&source, None)
            .context("Failed to collect phrases from stdin")?;
        1
    } else {
        collector.collect_from_files(files);
        files.len()
    };

    print_collect_errors(collector.errors());
    print_collected(collector.phrases().len(), inputs, verbose);
    Ok(collector.errors().len())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    write_json(&mut io::stdout().lock(), value, pretty)
}

/// Compact JSON, or one-space indented JSON when `pretty`, followed by a newline.
fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(b" "));
        value.serialize(&mut serializer)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}
