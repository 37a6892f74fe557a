//! Hash functions used to identify phrases and texts.
//!
//! - `jenkins`: 32-bit one-at-a-time hash, base-62 keys, phrase-level table hashes
//! - `tiger`: parameterized Tiger digest and the legacy text identifier built on it
//! - `md5_texts`: base64 MD5 text identifiers

mod jenkins;
mod jsfbt;
mod md5_texts;
mod phrase;
mod tiger;
mod tiger_tables;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use jenkins::{base62, jenkins_hash, uint_to_base_n};
pub use jsfbt::{jenkins_text_hash, jsfbt_hash, jsfbt_hash_key};
pub use md5_texts::md5_text_hash;
pub use phrase::{PhraseTexts, fbt_hash, hash_phrases};
pub use tiger::{DigestLength, TextEncoding, Tiger};

use crate::error::FbtError;

/// A `(text, description) -> identifier` function for the text packager.
pub trait HashFunction: Sync {
    fn hash(&self, text: &str, description: &str) -> String;
}

impl<F> HashFunction for F
where
    F: Fn(&str, &str) -> String + Sync,
{
    fn hash(&self, text: &str, description: &str) -> String {
        self(text, description)
    }
}

/// Hash functions selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashModule {
    /// Legacy `tiger128,3` of `text:::desc:`.
    #[default]
    Tiger,
    /// Base-62 Jenkins hash of the text's JSON and description.
    Jenkins,
    /// Base64 MD5 of the text followed by the description.
    Md5,
}

impl HashModule {
    pub const ALL: [HashModule; 3] = [HashModule::Tiger, HashModule::Jenkins, HashModule::Md5];

    pub fn name(self) -> &'static str {
        match self {
            HashModule::Tiger => "tiger",
            HashModule::Jenkins => "jenkins",
            HashModule::Md5 => "md5",
        }
    }
}

impl HashFunction for HashModule {
    fn hash(&self, text: &str, description: &str) -> String {
        match self {
            HashModule::Tiger => fbt_hash(text, description),
            HashModule::Jenkins => jenkins_text_hash(text, description),
            HashModule::Md5 => md5_text_hash(text, description),
        }
    }
}

impl FromStr for HashModule {
    type Err = FbtError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        HashModule::ALL
            .into_iter()
            .find(|module| module.name() == name)
            .ok_or_else(|| FbtError::UnsupportedHashModule {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for HashModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modules() {
        assert_eq!("tiger".parse::<HashModule>(), Ok(HashModule::Tiger));
        assert_eq!("jenkins".parse::<HashModule>(), Ok(HashModule::Jenkins));
        assert_eq!("md5".parse::<HashModule>(), Ok(HashModule::Md5));
    }

    #[test]
    fn unknown_module_is_unsupported() {
        assert_eq!(
            "md5Texts".parse::<HashModule>(),
            Err(FbtError::UnsupportedHashModule {
                name: "md5Texts".to_string()
            })
        );
    }

    #[test]
    fn closures_are_hash_functions() {
        let upper = |text: &str, desc: &str| format!("{}/{}", text.to_uppercase(), desc);
        assert_eq!(HashFunction::hash(&upper, "a", "b"), "A/b");
    }

    #[test]
    fn modules_dispatch_to_their_hash() {
        assert_eq!(
            HashModule::Tiger.hash("Sponge Bob", "Cartoon character name"),
            "90ce1bd0f3ca22cb190ab5b0b112c796"
        );
        assert_eq!(HashModule::Jenkins.hash("Hello", "greeting"), "1d8blU");
        assert_eq!(
            HashModule::Md5.hash("Hello", "greeting"),
            "bd/GxKMWXewNO4neqUMDjg=="
        );
    }
}
