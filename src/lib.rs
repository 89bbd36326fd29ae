//! # pet-encoding
//!
//! Pattern-verbalizer encoding for cloze-style classification. Turns labeled
//! text examples into masked, fixed-width model inputs.
//!
//! ```rust,no_run
//! use pet_encoding::{InputExample, PvpEncoder, Result, Task, TokenizerLoader};
//!
//! fn main() -> Result<()> {
//!     let tokenizer = TokenizerLoader::new("bert-base-uncased", "tokenizer.json").load()?;
//!     let encoder = PvpEncoder::builder(Task::Rte, tokenizer, ["entailment", "not_entailment"], 256)
//!         .pattern_id(1)
//!         .build();
//!
//!     let example = InputExample {
//!         guid: "rte-1".into(),
//!         text_a: "Dogs bark loudly.".into(),
//!         text_b: Some("Dogs make noise.".into()),
//!         label: Some("entailment".into()),
//!         meta: Default::default(),
//!     };
//!     let _sample = encoder.encode(&example, false, false)?;
//!
//!     Ok(())
//! }
//! ```

pub mod encoder;
pub mod error;
pub mod example;
pub mod loaders;
pub mod sample;
pub mod segment;
pub mod tasks;
pub mod tokenizer;
pub mod truncate;
pub mod verbalizer;

pub use encoder::{PvpEncoder, PvpEncoderBuilder, DEFAULT_SEED};
pub use error::{PetError, Result};
pub use example::{InputExample, Label};
pub use loaders::{HfLoader, TokenizerLoader};
pub use sample::{
    BlankInfillingAssembler, Encoded, InputLayout, LabelIndex, ModelInput, MultiTokenSample,
    SampleAssembler, SingleTokenSample,
};
pub use segment::{FilledPattern, Segment, TokenSegment};
pub use tasks::Task;
pub use tokenizer::{HfTokenizer, SpecialTokens, TokenizerAdapter};
pub use verbalizer::VerbalizerFile;
