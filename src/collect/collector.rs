use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use super::packager::{PackedPhrase, Packager};
use crate::core::{Phrase, flatten_enum_phrases};
use crate::hash::HashFunction;

/// Child phrase index mapped to the index of its enclosing phrase.
pub type ChildParentMappings = BTreeMap<usize, usize>;

/// Phrases read from one file, indexes local to that file.
#[derive(Debug, Default)]
struct FileCollection {
    phrases: Vec<Phrase>,
    child_parent_mappings: ChildParentMappings,
}

/// A file that could not be collected.
#[derive(Debug)]
pub struct CollectError {
    pub file: String,
    pub error: anyhow::Error,
}

/// Gathers phrases from many files.
///
/// Every file is read and parsed on its own; a failing file is recorded and skipped while the
/// others are still collected. With `react_native_mode` on, phrases with enum levels are split
/// into one phrase per enum value as they are collected.
#[derive(Debug, Default)]
pub struct Collector {
    react_native_mode: bool,
    phrases: Vec<Phrase>,
    child_parent_mappings: ChildParentMappings,
    errors: Vec<CollectError>,
}

impl Collector {
    pub fn new(react_native_mode: bool) -> Self {
        Self {
            react_native_mode,
            ..Self::default()
        }
    }

    /// Collect from JSON `source`; `file` names the phrases that carry no `filepath`.
    pub fn collect_from_source(&mut self, source: &str, file: Option<&str>) -> Result<()> {
        let collection = parse_collection(source, file, self.react_native_mode)?;
        self.append(collection);
        Ok(())
    }

    /// Collect every file, in parallel. Returns `false` if any of them failed.
    pub fn collect_from_files(&mut self, files: &[PathBuf]) -> bool {
        let react_native_mode = self.react_native_mode;
        let results: Vec<_> = files
            .par_iter()
            .map(|path| {
                let file = path.display().to_string();
                let result = read_collection(path, &file, react_native_mode);
                (file, result)
            })
            .collect();

        let mut all_collected = true;
        for (file, result) in results {
            match result {
                Ok(collection) => self.append(collection),
                Err(error) => {
                    all_collected = false;
                    self.errors.push(CollectError { file, error });
                }
            }
        }
        all_collected
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn child_parent_mappings(&self) -> &ChildParentMappings {
        &self.child_parent_mappings
    }

    pub fn errors(&self) -> &[CollectError] {
        &self.errors
    }

    /// Run `packager` over the collected phrases, dropping tables when `terse`.
    pub fn into_output(
        self,
        packager: Packager,
        hash: &dyn HashFunction,
        terse: bool,
    ) -> (CollectOutput, Vec<CollectError>) {
        let mut phrases = packager.pack(self.phrases, hash);
        if terse {
            phrases.iter_mut().for_each(|phrase| phrase.jsfbt = None);
        }
        let output = CollectOutput {
            phrases,
            child_parent_mappings: self.child_parent_mappings,
        };
        (output, self.errors)
    }

    fn append(&mut self, collection: FileCollection) {
        let offset = self.phrases.len();
        self.phrases.extend(collection.phrases);
        self.child_parent_mappings.extend(
            collection
                .child_parent_mappings
                .into_iter()
                .map(|(child, parent)| (child + offset, parent + offset)),
        );
    }
}

/// `{phrases, childParentMappings}` as printed by `fbt-collect pack`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectOutput {
    pub phrases: Vec<PackedPhrase>,
    pub child_parent_mappings: ChildParentMappings,
}

fn read_collection(path: &Path, file: &str, react_native_mode: bool) -> Result<FileCollection> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", file))?;
    parse_collection(&source, Some(file), react_native_mode)
}

fn parse_collection(
    source: &str,
    file: Option<&str>,
    react_native_mode: bool,
) -> Result<FileCollection> {
    let (mut phrases, mappings) = read_phrases(source)?;

    for (&child, &parent) in &mappings {
        if child >= phrases.len() || parent >= phrases.len() {
            bail!(
                "childParentMappings refers to phrase {} -> {} but only {} phrase(s) were read",
                child,
                parent,
                phrases.len()
            );
        }
    }

    if let Some(file) = file {
        phrases
            .iter_mut()
            .filter(|phrase| phrase.filepath.is_none())
            .for_each(|phrase| phrase.filepath = Some(file.to_string()));
    }

    if !react_native_mode {
        return Ok(FileCollection {
            phrases,
            child_parent_mappings: mappings,
        });
    }

    // Each input phrase keeps the index of its first flattened phrase.
    let mut first_index = Vec::with_capacity(phrases.len());
    let mut flattened = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        first_index.push(flattened.len());
        flattened.extend(flatten_enum_phrases(vec![phrase])?);
    }
    Ok(FileCollection {
        phrases: flattened,
        child_parent_mappings: mappings
            .into_iter()
            .map(|(child, parent)| (first_index[child], first_index[parent]))
            .collect(),
    })
}

/// A collected-phrases file holds either a bare list of phrases or the output of an earlier
/// collection run.
fn read_phrases(source: &str) -> Result<(Vec<Phrase>, ChildParentMappings)> {
    let value: Value = serde_json::from_str(source).context("Failed to parse JSON")?;
    match value {
        Value::Array(_) => {
            let phrases = serde_json::from_value(value).context("Invalid phrase list")?;
            Ok((phrases, ChildParentMappings::new()))
        }
        Value::Object(mut object) => {
            let phrases = object
                .remove("phrases")
                .context("Missing 'phrases' in collected output")?;
            let phrases = serde_json::from_value(phrases).context("Invalid 'phrases'")?;
            let mappings = match object.remove("childParentMappings") {
                Some(mappings) => read_mappings(mappings)?,
                None => ChildParentMappings::new(),
            };
            Ok((phrases, mappings))
        }
        _ => bail!("Expected a list of phrases or a {{phrases, childParentMappings}} object"),
    }
}

/// JSON object keys are strings; phrase indexes are parsed out of them.
fn read_mappings(value: Value) -> Result<ChildParentMappings> {
    let raw: BTreeMap<String, usize> =
        serde_json::from_value(value).context("Invalid 'childParentMappings'")?;
    raw.into_iter()
        .map(|(child, parent)| -> Result<(usize, usize)> {
            let child = child.parse::<usize>().with_context(|| {
                format!("Invalid phrase index `{}` in 'childParentMappings'", child)
            })?;
            Ok((child, parent))
        })
        .collect()
}
