//! Tokenizer adapter boundary.
//!
//! The encoding engine only needs a handful of operations from a tokenizer:
//! plain text-to-ids encoding without special tokens, decoding for
//! diagnostics, and the ids of the special tokens the input layout uses.
//! [`HfTokenizer`] implements the adapter on top of the `tokenizers` crate.

use std::collections::HashSet;

use crate::{PetError, Result};

/// Operations the encoding engine requires from a tokenizer.
pub trait TokenizerAdapter {
    /// Encode raw text into token ids, never adding special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back into text.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// Surface form of a single id, for diagnostics.
    fn id_to_token(&self, id: u32) -> Option<String>;

    /// Textual mask token inserted into templates.
    fn mask_token(&self) -> &str;

    fn mask_id(&self) -> u32;

    fn cls_id(&self) -> u32;

    fn sep_id(&self) -> u32;

    fn pad_id(&self) -> u32;

    /// Start-of-piece token that opens the generation span.
    fn piece_id(&self) -> u32;

    /// Whether `id` is a reserved/special id.
    fn is_special_id(&self, id: u32) -> bool;
}

/// Surface forms of the special tokens expected in a wrapped vocabulary.
#[derive(Debug, Clone)]
pub struct SpecialTokens {
    pub cls: String,
    pub sep: String,
    pub mask: String,
    pub pad: String,
    pub piece: String,
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self {
            cls: "[CLS]".to_string(),
            sep: "[SEP]".to_string(),
            mask: "[MASK]".to_string(),
            pad: "[PAD]".to_string(),
            piece: "<|startofpiece|>".to_string(),
        }
    }
}

/// [`TokenizerAdapter`] backed by a `tokenizers::Tokenizer`.
pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
    mask_token: String,
    mask_id: u32,
    cls_id: u32,
    sep_id: u32,
    pad_id: u32,
    piece_id: u32,
    special_ids: HashSet<u32>,
}

impl HfTokenizer {
    /// Wrap `inner`, resolving every special token to its id up front.
    /// Fails if any of the configured tokens is absent from the vocabulary.
    pub fn new(inner: tokenizers::Tokenizer, special: SpecialTokens) -> Result<Self> {
        let resolve = |token: &str| {
            inner
                .token_to_id(token)
                .ok_or_else(|| PetError::MissingSpecialToken(token.to_string()))
        };
        let mask_id = resolve(&special.mask)?;
        let cls_id = resolve(&special.cls)?;
        let sep_id = resolve(&special.sep)?;
        let pad_id = resolve(&special.pad)?;
        let piece_id = resolve(&special.piece)?;
        let special_ids = [mask_id, cls_id, sep_id, pad_id, piece_id]
            .into_iter()
            .collect();

        Ok(Self {
            inner,
            mask_token: special.mask,
            mask_id,
            cls_id,
            sep_id,
            pad_id,
            piece_id,
            special_ids,
        })
    }

    pub fn inner(&self) -> &tokenizers::Tokenizer {
        &self.inner
    }
}

impl TokenizerAdapter for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| PetError::Tokenization(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, false)
            .map_err(|e| PetError::Tokenization(e.to_string()))
    }

    fn id_to_token(&self, id: u32) -> Option<String> {
        self.inner.id_to_token(id)
    }

    fn mask_token(&self) -> &str {
        &self.mask_token
    }

    fn mask_id(&self) -> u32 {
        self.mask_id
    }

    fn cls_id(&self) -> u32 {
        self.cls_id
    }

    fn sep_id(&self) -> u32 {
        self.sep_id
    }

    fn pad_id(&self) -> u32 {
        self.pad_id
    }

    fn piece_id(&self) -> u32 {
        self.piece_id
    }

    fn is_special_id(&self, id: u32) -> bool {
        self.special_ids.contains(&id)
    }
}
