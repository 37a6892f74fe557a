//! Text identifiers used to match translations: legacy `tiger128,3` over text and
//! description.

use serde::{Deserialize, Serialize};

use super::tiger::{DigestLength, Tiger};

const FBT_TIGER: Tiger = Tiger::new(DigestLength::L128, 0, true);

/// Identifier of one text/description pair, 32 hex characters.
pub fn fbt_hash(text: &str, description: &str) -> String {
    FBT_TIGER.hash(&format!("{}:::{}:", text, description))
}

/// Texts of one call site sharing a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTexts {
    pub desc: String,
    pub texts: Vec<String>,
}

/// One list of hashes per call site, in input order.
pub fn hash_phrases(phrases: &[PhraseTexts]) -> Vec<Vec<String>> {
    phrases
        .iter()
        .map(|phrase| {
            phrase
                .texts
                .iter()
                .map(|text| fbt_hash(text, &phrase.desc))
                .collect()
        })
        .collect()
}
