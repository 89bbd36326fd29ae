use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    // Configuration
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("No pattern implemented for id {pattern_id} of task '{task}'")]
    UnknownPattern {
        task: &'static str,
        pattern_id: usize,
    },

    #[error("'labeled' can only be set to true if 'priming' is also set to true")]
    LabeledWithoutPriming,

    #[error("Special token {0:?} is missing from the tokenizer vocabulary")]
    MissingSpecialToken(String),

    // Validation
    #[error("Verbalization {word:?} does not correspond to a single token, got {decoded:?}")]
    MultiTokenVerbalization { word: String, decoded: String },

    #[error("Verbalization {word:?} is mapped to the special token {token:?}")]
    SpecialVerbalization { word: String, token: String },

    #[error("Unknown label: {0:?}")]
    UnknownLabel(String),

    #[error("Example '{0}' has no label")]
    MissingLabel(String),

    #[error("Expected a single label, got a list")]
    LabelCardinality,

    #[error("Missing metadata field {0:?}")]
    MissingMeta(String),

    #[error("Metadata field {field:?} is not {expected}")]
    InvalidMeta {
        field: String,
        expected: &'static str,
    },

    #[error("Question {0:?} does not contain an @placeholder marker")]
    MissingPlaceholder(String),

    #[error("Priming supports exactly one verbalization per label, got {0}")]
    PrimingVerbalizations(usize),

    #[error("Expected the mask token at position 1, found it at {0:?}")]
    MaskPosition(Option<usize>),

    #[error("Input contains no mask token")]
    MissingMask,

    // Invariants
    #[error("Cannot meet the length budget: no shortenable tokens remain")]
    NothingToTruncate,

    #[error("Assembled sequence of {len} tokens exceeds the maximum length {max_length}")]
    SequenceTooLong { len: usize, max_length: usize },

    // Pass-through from dependencies
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PetError>;

impl From<hf_hub::api::sync::ApiError> for PetError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PetError::Download(value.to_string())
    }
}
