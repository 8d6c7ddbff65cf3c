//! Compact seed-phrase codes.
//!
//! ```text
//! encode: word → index (or the literal word) + "."
//! decode: split on ".", skip empty tokens, index → word
//! ```
//!
//! Decoding resolves indices through the ordered word array, so every token
//! costs one bounds-checked lookup.

use seedfarm_core::constants::COMPACT_CODE_SEPARATOR;
use seedfarm_core::error::{Result, SeedfarmError};

use crate::vocabulary::Vocabulary;

impl Vocabulary {
    /// Encodes a phrase given as words.
    ///
    /// In-vocabulary words become their decimal index; any other word is
    /// written as-is. Every token, including the last, is followed by `.`.
    pub fn encode<S: AsRef<str>>(&self, phrase: &[S]) -> String {
        let mut code = String::with_capacity(phrase.len() * 5);
        for word in phrase {
            let word = word.as_ref();
            match self.index_of(word) {
                Some(index) => code.push_str(&index.to_string()),
                None => code.push_str(word),
            }
            code.push(COMPACT_CODE_SEPARATOR);
        }
        code
    }

    /// Encodes a whitespace-separated phrase.
    pub fn encode_phrase(&self, phrase: &str) -> String {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        self.encode(&words)
    }

    /// Decodes a code back into its words.
    ///
    /// Fails with [`SeedfarmError::Format`] on a non-numeric token or an index
    /// outside the vocabulary. An empty code decodes to an empty phrase.
    pub fn decode(&self, code: &str) -> Result<Vec<String>> {
        code.split(COMPACT_CODE_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(|token| {
                let index: usize = token.parse().map_err(|_| {
                    SeedfarmError::Format(format!("token {token:?} is not a word index"))
                })?;
                self.word(index).map(str::to_string).ok_or_else(|| {
                    SeedfarmError::Format(format!(
                        "index {index} is outside the vocabulary ({} words)",
                        self.len()
                    ))
                })
            })
            .collect()
    }

    /// Decodes a code into a phrase joined with single spaces.
    pub fn decode_phrase(&self, code: &str) -> Result<String> {
        Ok(self.decode(code)?.join(" "))
    }
}

/// Encodes a whitespace-separated phrase with the English vocabulary.
pub fn encode(phrase: &str) -> Result<String> {
    Ok(Vocabulary::english()?.encode_phrase(phrase))
}

/// Decodes a code into a phrase with the English vocabulary.
pub fn decode(code: &str) -> Result<String> {
    Vocabulary::english()?.decode_phrase(code)
}
