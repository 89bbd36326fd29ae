//! Tokenizer loading utilities for Hugging Face Hub integration.
//!
//! ## Main Types
//!
//! - [`HfLoader`] - Generic Hugging Face file loader with retry logic
//! - [`TokenizerLoader`] - Loads tokenizers from Hugging Face repositories
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use pet_encoding::{Result, loaders::TokenizerLoader};
//!
//! fn main() -> Result<()> {
//!     let tokenizer_loader =
//!         TokenizerLoader::new("bert-base-uncased", "tokenizer.json");
//!     let _tokenizer = tokenizer_loader.load()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! All loaders include built-in retry logic to handle temporary network issues
//! and Hugging Face Hub lock acquisition failures.

use std::path::PathBuf;
use std::time::Duration;

use crate::tokenizer::{HfTokenizer, SpecialTokens};
use crate::{PetError, Result};

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub fn load(&self) -> Result<PathBuf> {
        let hf_api = hf_hub::api::sync::ApiBuilder::new()
            .build()
            .map_err(|e| PetError::Download(e.to_string()))?;
        let hf_repo = self.repo.clone();
        let hf_api = hf_api.model(hf_repo);

        // Retry logic for lock acquisition failures
        let max_retries = 3;
        let mut last_error: Option<PetError> = None;

        for attempt in 0..max_retries {
            match hf_api.get(self.filename.as_str()) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    let error_msg = e.to_string();
                    if error_msg.contains("Lock acquisition failed") && attempt < max_retries - 1 {
                        // Wait before retrying, with exponential backoff
                        let wait_time = Duration::from_millis(100 * (1 << attempt));
                        std::thread::sleep(wait_time);
                        last_error = Some(PetError::Download(error_msg));
                        continue;
                    }
                    return Err(PetError::Download(error_msg));
                }
            }
        }

        // If we exhausted all retries, return the last encountered error or a generic one
        Err(last_error.unwrap_or_else(|| PetError::Download("unknown failure".to_string())))
    }
}

#[derive(Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
    special_tokens: SpecialTokens,
}

impl TokenizerLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        let tokenizer_file_loader = HfLoader::new(repo, filename);

        Self {
            tokenizer_file_loader,
            special_tokens: SpecialTokens::default(),
        }
    }

    /// Override the special-token surface forms looked up in the vocabulary.
    pub fn with_special_tokens(mut self, special_tokens: SpecialTokens) -> Self {
        self.special_tokens = special_tokens;
        self
    }

    pub fn load(&self) -> Result<HfTokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load()?;

        let tokenizer = tokenizers::Tokenizer::from_file(tokenizer_file_path)
            .map_err(|e| PetError::Tokenization(format!("Failed to load tokenizer: {e}")))?;

        HfTokenizer::new(tokenizer, self.special_tokens.clone())
    }
}
