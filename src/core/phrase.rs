use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::builder::PhraseTable;

/// One extracted call site as written by the collector.
///
/// Call-site options (`desc`, `author`, `preserveWhitespace`...) are kept verbatim in
/// `options`; only the location fields, the project and the table are interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Phrase {
    #[serde(default)]
    pub filepath: Option<String>,
    #[serde(default)]
    pub line_beg: u32,
    #[serde(default)]
    pub col_beg: u32,
    #[serde(default)]
    pub line_end: u32,
    #[serde(default)]
    pub col_end: u32,
    #[serde(flatten)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub project: String,
    pub jsfbt: PhraseTable,
}

impl Phrase {
    pub fn new(jsfbt: PhraseTable) -> Self {
        Self {
            jsfbt,
            ..Self::default()
        }
    }

    /// Same call site, different table.
    pub fn with_table(&self, jsfbt: PhraseTable) -> Self {
        Self {
            filepath: self.filepath.clone(),
            line_beg: self.line_beg,
            col_beg: self.col_beg,
            line_end: self.line_end,
            col_end: self.col_end,
            options: self.options.clone(),
            project: self.project.clone(),
            jsfbt,
        }
    }
}
