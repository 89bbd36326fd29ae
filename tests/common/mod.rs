//! Shared test tokenizer: whitespace-splitting with a growable vocabulary.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use pet_encoding::{Result, TokenizerAdapter};

pub const CLS: u32 = 0;
pub const SEP: u32 = 1;
pub const MASK: u32 = 2;
pub const PAD: u32 = 3;
pub const PIECE: u32 = 4;

struct Vocab {
    ids: HashMap<String, u32>,
    tokens: Vec<String>,
}

pub struct MockTokenizer {
    vocab: Mutex<Vocab>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        let tokens: Vec<String> = ["[CLS]", "[SEP]", "[MASK]", "[PAD]", "<|startofpiece|>"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ids = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self {
            vocab: Mutex::new(Vocab { ids, tokens }),
        }
    }

    fn intern(&self, word: &str) -> u32 {
        let mut vocab = self.vocab.lock().unwrap();
        if let Some(&id) = vocab.ids.get(word) {
            return id;
        }
        let id = vocab.tokens.len() as u32;
        vocab.tokens.push(word.to_string());
        vocab.ids.insert(word.to_string(), id);
        id
    }

    /// Id a word was (or would be) assigned.
    pub fn id_of(&self, word: &str) -> u32 {
        self.intern(word)
    }
}

impl TokenizerAdapter for MockTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text.split_whitespace().map(|w| self.intern(w)).collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let vocab = self.vocab.lock().unwrap();
        let words: Vec<&str> = ids
            .iter()
            .filter_map(|&id| vocab.tokens.get(id as usize).map(String::as_str))
            .collect();
        Ok(words.join(" "))
    }

    fn id_to_token(&self, id: u32) -> Option<String> {
        self.vocab.lock().unwrap().tokens.get(id as usize).cloned()
    }

    fn mask_token(&self) -> &str {
        "[MASK]"
    }

    fn mask_id(&self) -> u32 {
        MASK
    }

    fn cls_id(&self) -> u32 {
        CLS
    }

    fn sep_id(&self) -> u32 {
        SEP
    }

    fn pad_id(&self) -> u32 {
        PAD
    }

    fn piece_id(&self) -> u32 {
        PIECE
    }

    fn is_special_id(&self, id: u32) -> bool {
        id <= PIECE
    }
}
