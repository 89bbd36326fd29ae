//! Verbalization resolution and the optional verbalizer-file table.

use std::collections::HashMap;
use std::path::Path;

use crate::tokenizer::TokenizerAdapter;
use crate::{PetError, Result};

/// Token ids of a verbalization; any length is accepted.
pub fn verbalization_ids(word: &str, tokenizer: &dyn TokenizerAdapter) -> Result<Vec<u32>> {
    tokenizer.encode(word)
}

/// Token id of a verbalization that must map to exactly one non-special
/// token.
pub fn single_verbalization_id(word: &str, tokenizer: &dyn TokenizerAdapter) -> Result<u32> {
    let ids = tokenizer.encode(word)?;
    if ids.len() != 1 {
        return Err(PetError::MultiTokenVerbalization {
            word: word.to_string(),
            decoded: tokenizer.decode(&ids)?,
        });
    }
    let id = ids[0];
    if tokenizer.is_special_id(id) {
        return Err(PetError::SpecialVerbalization {
            word: word.to_string(),
            token: tokenizer.id_to_token(id).unwrap_or_default(),
        });
    }
    Ok(id)
}

/// Verbalizations loaded from a plain-text file.
///
/// A line consisting solely of digits opens a new pattern-id section; every
/// following non-empty line is `label word1 word2 ...`. Blank lines are
/// skipped. Unknown labels resolve to an empty list so callers can layer
/// other verbalization sources on top.
#[derive(Debug, Clone, Default)]
pub struct VerbalizerFile {
    verbalizers: HashMap<usize, HashMap<String, Vec<String>>>,
}

impl VerbalizerFile {
    /// Load and parse a verbalizer file. Pure apart from the read itself;
    /// the resulting table is meant to be injected into an encoder builder.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut verbalizers: HashMap<usize, HashMap<String, Vec<String>>> = HashMap::new();
        let mut current: Option<usize> = None;

        for line in content.lines() {
            if !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(id) = line.parse::<usize>() {
                    current = Some(id);
                }
                continue;
            }
            let mut words = line.split_whitespace();
            let Some(label) = words.next() else {
                continue;
            };
            // Lines before the first pattern-id section have no home.
            let Some(pattern_id) = current else {
                continue;
            };
            verbalizers
                .entry(pattern_id)
                .or_default()
                .insert(label.to_string(), words.map(str::to_string).collect());
        }

        Ok(Self { verbalizers })
    }

    /// Ordered verbalizations for `label` under `pattern_id`; empty when the
    /// file defines none.
    pub fn get(&self, pattern_id: usize, label: &str) -> Vec<String> {
        self.verbalizers
            .get(&pattern_id)
            .and_then(|m| m.get(label))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WordTokenizer;

    impl TokenizerAdapter for WordTokenizer {
        fn encode(&self, text: &str) -> Result<Vec<u32>> {
            Ok(text
                .split_whitespace()
                .map(|w| match w {
                    "[MASK]" => 2,
                    "Yes" => 10,
                    _ => 50,
                })
                .collect())
        }

        fn decode(&self, ids: &[u32]) -> Result<String> {
            Ok(format!("{ids:?}"))
        }

        fn id_to_token(&self, id: u32) -> Option<String> {
            (id == 2).then(|| "[MASK]".to_string())
        }

        fn mask_token(&self) -> &str {
            "[MASK]"
        }

        fn mask_id(&self) -> u32 {
            2
        }

        fn cls_id(&self) -> u32 {
            0
        }

        fn sep_id(&self) -> u32 {
            1
        }

        fn pad_id(&self) -> u32 {
            3
        }

        fn piece_id(&self) -> u32 {
            4
        }

        fn is_special_id(&self, id: u32) -> bool {
            id <= 4
        }
    }

    #[test]
    fn strict_resolution_returns_the_single_id() {
        assert_eq!(single_verbalization_id("Yes", &WordTokenizer).unwrap(), 10);
    }

    #[test]
    fn strict_resolution_rejects_multi_token_words() {
        let err = single_verbalization_id("two words", &WordTokenizer).unwrap_err();
        match err {
            PetError::MultiTokenVerbalization { word, decoded } => {
                assert_eq!(word, "two words");
                assert!(!decoded.is_empty());
            }
            other => panic!("expected MultiTokenVerbalization, got {other:?}"),
        }
    }

    #[test]
    fn strict_resolution_rejects_special_tokens() {
        let err = single_verbalization_id("[MASK]", &WordTokenizer).unwrap_err();
        match err {
            PetError::SpecialVerbalization { word, token } => {
                assert_eq!(word, "[MASK]");
                assert_eq!(token, "[MASK]");
            }
            other => panic!("expected SpecialVerbalization, got {other:?}"),
        }
    }

    #[test]
    fn lenient_resolution_accepts_any_length() {
        assert_eq!(
            verbalization_ids("two words", &WordTokenizer).unwrap().len(),
            2
        );
    }

    const FILE: &str = "0\nentailment Yes\nnot_entailment No\n\n1\nentailment Right Correct\nnot_entailment Wrong\n";

    #[test]
    fn parses_pattern_sections() {
        let table = VerbalizerFile::parse(FILE).unwrap();

        assert_eq!(table.get(0, "entailment"), vec!["Yes".to_string()]);
        assert_eq!(
            table.get(1, "entailment"),
            vec!["Right".to_string(), "Correct".to_string()]
        );
        assert_eq!(table.get(1, "not_entailment"), vec!["Wrong".to_string()]);
    }

    #[test]
    fn unknown_labels_resolve_to_an_empty_list() {
        let table = VerbalizerFile::parse(FILE).unwrap();

        assert!(table.get(0, "neutral").is_empty());
        assert!(table.get(7, "entailment").is_empty());
    }

    #[test]
    fn loads_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbalizers.txt");
        std::fs::write(&path, FILE).unwrap();

        let table = VerbalizerFile::load(&path).unwrap();
        assert_eq!(table.get(0, "not_entailment"), vec!["No".to_string()]);
    }
}
