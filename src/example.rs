//! Input records consumed by the encoder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{PetError, Result};

/// Label attached to an [`InputExample`]: a single class for most tasks, a
/// list for multi-answer tasks that mark every correct candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Single(String),
    Multi(Vec<String>),
}

impl From<&str> for Label {
    fn from(label: &str) -> Self {
        Label::Single(label.to_string())
    }
}

impl From<String> for Label {
    fn from(label: String) -> Self {
        Label::Single(label)
    }
}

/// A single labeled example. Owned by the caller; the encoder only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputExample {
    /// Unique identifier, carried through to multi-choice samples.
    pub guid: String,
    /// Primary text segment.
    pub text_a: String,
    /// Optional secondary text segment.
    #[serde(default)]
    pub text_b: Option<String>,
    #[serde(default)]
    pub label: Option<Label>,
    /// Task-specific fields such as candidate spans, pronouns or answer
    /// choices.
    #[serde(default)]
    pub meta: HashMap<String, Value>,
}

impl InputExample {
    pub fn meta_str(&self, key: &str) -> Result<&str> {
        self.meta
            .get(key)
            .ok_or_else(|| PetError::MissingMeta(key.to_string()))?
            .as_str()
            .ok_or_else(|| PetError::InvalidMeta {
                field: key.to_string(),
                expected: "a string",
            })
    }

    pub fn meta_usize(&self, key: &str) -> Result<usize> {
        self.meta
            .get(key)
            .ok_or_else(|| PetError::MissingMeta(key.to_string()))?
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| PetError::InvalidMeta {
                field: key.to_string(),
                expected: "an unsigned integer",
            })
    }

    pub fn meta_str_list(&self, key: &str) -> Result<Vec<String>> {
        let value = self
            .meta
            .get(key)
            .ok_or_else(|| PetError::MissingMeta(key.to_string()))?;
        let invalid = || PetError::InvalidMeta {
            field: key.to_string(),
            expected: "a list of strings",
        };
        value
            .as_array()
            .ok_or_else(invalid)?
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
            .collect()
    }
}
