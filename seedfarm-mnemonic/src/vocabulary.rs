//! Reference vocabulary with integrity verification.
//!
//! Compact codes store word indices, so a substituted or corrupted list would
//! silently decode every code to the wrong phrase. A vocabulary is therefore
//! only constructed after its CRC-32 matches the expected value.
//!
//! The checksum covers the canonical text form of the list: every word
//! followed by `\n`. For the BIP-39 English list this is byte-identical to
//! the published `english.txt`.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use seedfarm_core::constants::{VOCABULARY_CRC32, VOCABULARY_SIZE};
use seedfarm_core::error::{Result, SeedfarmError};

static ENGLISH: OnceLock<Vocabulary> = OnceLock::new();

/// Computes the CRC-32 (IEEE) of a word list in canonical text form.
pub fn checksum<S: AsRef<str>>(words: &[S]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for word in words {
        hasher.update(word.as_ref().as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize()
}

/// An ordered word list plus its word → index map.
///
/// Read-only after construction; share it by reference.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Returns the process-wide BIP-39 English vocabulary.
    ///
    /// The list is verified on first call. A checksum mismatch is returned as
    /// [`SeedfarmError::VocabularyChecksum`] and must abort startup.
    pub fn english() -> Result<&'static Vocabulary> {
        if let Some(vocabulary) = ENGLISH.get() {
            return Ok(vocabulary);
        }

        let words = bip39::Language::English.word_list();
        let vocabulary = Self::from_words(&words[..], VOCABULARY_CRC32)?;
        debug!(words = vocabulary.len(), "Reference vocabulary verified");

        Ok(ENGLISH.get_or_init(|| vocabulary))
    }

    /// Builds a vocabulary from words, verifying the expected checksum.
    pub fn from_words<S: AsRef<str>>(words: &[S], expected_checksum: u32) -> Result<Self> {
        let actual = checksum(words);
        if actual != expected_checksum {
            return Err(SeedfarmError::VocabularyChecksum {
                expected: expected_checksum,
                actual,
            });
        }

        let words: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            index.entry(word.clone()).or_insert(i);
        }

        Ok(Self { words, index })
    }

    /// Builds a vocabulary from newline-separated text (e.g. a word list file).
    ///
    /// Surrounding whitespace and blank lines are ignored.
    pub fn from_text(text: &str, expected_checksum: u32) -> Result<Self> {
        let words: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_words(&words, expected_checksum)
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the vocabulary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true if this is a full-size BIP-39 list.
    pub fn is_standard_size(&self) -> bool {
        self.words.len() == VOCABULARY_SIZE
    }

    /// Returns the word at `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Returns the index of `word`.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Returns the words in order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_english_verifies() {
        let vocabulary = Vocabulary::english().unwrap();
        assert_eq!(vocabulary.len(), VOCABULARY_SIZE);
        assert!(vocabulary.is_standard_size());
        assert_eq!(checksum(vocabulary.words()), VOCABULARY_CRC32);
    }

    #[test]
    fn test_english_is_shared() {
        let a = Vocabulary::english().unwrap();
        let b = Vocabulary::english().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test_case("abandon", 0)]
    #[test_case("cube", 427)]
    #[test_case("squeeze", 1692)]
    #[test_case("zoo", 2047)]
    fn test_index_lookup(word: &str, index: usize) {
        let vocabulary = Vocabulary::english().unwrap();
        assert_eq!(vocabulary.index_of(word), Some(index));
        assert_eq!(vocabulary.word(index), Some(word));
    }

    #[test]
    fn test_missing_word_and_index() {
        let vocabulary = Vocabulary::english().unwrap();
        assert_eq!(vocabulary.index_of("notaword"), None);
        assert_eq!(vocabulary.word(VOCABULARY_SIZE), None);
    }

    #[test]
    fn test_tampered_list_rejected() {
        let mut words: Vec<&str> = bip39::Language::English.word_list().to_vec();
        words[1692] = "squash";

        let err = Vocabulary::from_words(&words, VOCABULARY_CRC32).unwrap_err();
        match err {
            SeedfarmError::VocabularyChecksum { expected, actual } => {
                assert_eq!(expected, VOCABULARY_CRC32);
                assert_ne!(actual, VOCABULARY_CRC32);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(Vocabulary::from_words(&words, VOCABULARY_CRC32).unwrap_err().is_fatal());
    }

    #[test]
    fn test_reordered_list_rejected() {
        let mut words: Vec<&str> = bip39::Language::English.word_list().to_vec();
        words.swap(0, 1);
        assert!(Vocabulary::from_words(&words, VOCABULARY_CRC32).is_err());
    }

    #[test]
    fn test_from_text_matches_word_list() {
        let words = bip39::Language::English.word_list();
        let text = format!("{}\n", words.join("\n"));

        let vocabulary = Vocabulary::from_text(&text, VOCABULARY_CRC32).unwrap();
        assert_eq!(vocabulary.len(), VOCABULARY_SIZE);
        assert_eq!(vocabulary.word(861), Some("hill"));
    }

    #[test]
    fn test_from_text_tolerates_crlf() {
        let words = bip39::Language::English.word_list();
        let text = words.join("\r\n");
        assert!(Vocabulary::from_text(&text, VOCABULARY_CRC32).is_ok());
    }

    #[test]
    fn test_custom_vocabulary() {
        let words = ["alpha", "beta", "gamma"];
        let vocabulary = Vocabulary::from_words(&words, checksum(&words)).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert!(!vocabulary.is_standard_size());
        assert_eq!(vocabulary.index_of("gamma"), Some(2));
    }

    #[test]
    fn test_duplicate_words_keep_first_index() {
        let words = ["alpha", "beta", "alpha"];
        let vocabulary = Vocabulary::from_words(&words, checksum(&words)).unwrap();
        assert_eq!(vocabulary.index_of("alpha"), Some(0));
    }
}
