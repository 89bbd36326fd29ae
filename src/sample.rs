//! Model-input assembly.
//!
//! The encoder hands flat token sequences to a [`SampleAssembler`] and treats
//! the resulting layout as opaque. [`BlankInfillingAssembler`] provides the
//! default layout: a classification token in front of the context and a
//! start-of-piece token opening the answer span, no separator.

use crate::tokenizer::TokenizerAdapter;
use crate::{PetError, Result};

/// Which special tokens the assembled input carries.
#[derive(Debug, Clone, Copy)]
pub struct InputLayout {
    pub add_cls: bool,
    pub add_sep: bool,
    pub add_piece: bool,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self {
            add_cls: true,
            add_sep: false,
            add_piece: true,
        }
    }
}

/// Fixed-width arrays describing one model input; every field is exactly
/// `max_length` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInput {
    pub ids: Vec<u32>,
    pub type_ids: Vec<u32>,
    pub padding_mask: Vec<u32>,
    pub position_ids: Vec<u32>,
    pub separator_mask: Vec<u32>,
    pub target_ids: Vec<u32>,
    pub loss_mask: Vec<u32>,
}

/// Boundary turning flat token sequences into model-ready arrays.
///
/// `num_special_tokens` and `assemble` must agree on the layout: the
/// truncation budget is computed from the former and the latter has to fit
/// its output into `max_length` slots.
pub trait SampleAssembler {
    /// Number of input slots occupied by anything other than the part A/B
    /// tokens themselves.
    fn num_special_tokens(&self, has_part_b: bool, answer_len: usize) -> usize;

    fn assemble(
        &self,
        tokenizer: &dyn TokenizerAdapter,
        tokens_a: &[u32],
        tokens_b: Option<&[u32]>,
        answer: Option<&[u32]>,
        max_length: usize,
    ) -> Result<ModelInput>;
}

/// Default assembler: a `[CLS] part_a part_b` context with sequential
/// positions, followed by a generation span `[piece] answer...` whose
/// positions all point at the mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankInfillingAssembler {
    layout: InputLayout,
}

impl BlankInfillingAssembler {
    pub fn new(layout: InputLayout) -> Self {
        Self { layout }
    }
}

impl SampleAssembler for BlankInfillingAssembler {
    fn num_special_tokens(&self, has_part_b: bool, answer_len: usize) -> usize {
        let mut n = 0;
        if self.layout.add_cls {
            n += 1;
        }
        if self.layout.add_sep && has_part_b {
            n += 1;
        }
        if self.layout.add_piece {
            // The span feeds [piece] + answer[..n-1] and predicts answer[..n].
            n += 1 + answer_len.saturating_sub(1);
        }
        n
    }

    fn assemble(
        &self,
        tokenizer: &dyn TokenizerAdapter,
        tokens_a: &[u32],
        tokens_b: Option<&[u32]>,
        answer: Option<&[u32]>,
        max_length: usize,
    ) -> Result<ModelInput> {
        let mut ids: Vec<u32> = Vec::with_capacity(max_length);
        let mut type_ids: Vec<u32> = Vec::with_capacity(max_length);

        if self.layout.add_cls {
            ids.push(tokenizer.cls_id());
            type_ids.push(0);
        }
        ids.extend_from_slice(tokens_a);
        type_ids.extend(std::iter::repeat(0).take(tokens_a.len()));
        if let Some(tokens_b) = tokens_b {
            if self.layout.add_sep {
                ids.push(tokenizer.sep_id());
                type_ids.push(1);
            }
            ids.extend_from_slice(tokens_b);
            type_ids.extend(std::iter::repeat(1).take(tokens_b.len()));
        }

        let context_len = ids.len();
        let mut position_ids: Vec<u32> = (0..context_len as u32).collect();
        let mut separator_mask = vec![1u32; context_len];
        let mut target_ids = vec![0u32; context_len];
        let mut loss_mask = vec![0u32; context_len];

        if self.layout.add_piece {
            let mask_position = ids
                .iter()
                .position(|&id| id == tokenizer.mask_id())
                .ok_or(PetError::MissingMask)? as u32;
            let answer = answer.unwrap_or(&[]);

            ids.push(tokenizer.piece_id());
            type_ids.push(0);
            position_ids.push(mask_position);
            separator_mask.push(0);
            target_ids.push(answer.first().copied().unwrap_or(0));
            loss_mask.push(1);

            for (k, &token_id) in answer.iter().enumerate().skip(1) {
                ids.push(answer[k - 1]);
                type_ids.push(0);
                position_ids.push(mask_position);
                separator_mask.push(0);
                target_ids.push(token_id);
                loss_mask.push(1);
            }
        }

        let len = ids.len();
        if len > max_length {
            return Err(PetError::SequenceTooLong { len, max_length });
        }

        let mut padding_mask = vec![1u32; len];
        ids.resize(max_length, tokenizer.pad_id());
        type_ids.resize(max_length, 0);
        position_ids.resize(max_length, 0);
        separator_mask.resize(max_length, 0);
        target_ids.resize(max_length, 0);
        loss_mask.resize(max_length, 0);
        padding_mask.resize(max_length, 0);

        Ok(ModelInput {
            ids,
            type_ids,
            padding_mask,
            position_ids,
            separator_mask,
            target_ids,
            loss_mask,
        })
    }
}

/// Index of an example's label in the ordered label vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelIndex {
    Single(usize),
    Multi(Vec<usize>),
}

/// Encoded sample for a single-token task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTokenSample {
    pub input: ModelInput,
    pub label: usize,
}

/// Encoded sample for a multi-token task: one input per answer candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiTokenSample {
    pub choices: Vec<ModelInput>,
    pub label: LabelIndex,
    pub unique_id: String,
}

/// Output of `PvpEncoder::encode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Single(SingleTokenSample),
    MultiChoice(MultiTokenSample),
    /// Flat, unpadded id sequence used as an in-context demonstration.
    Priming(Vec<u32>),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTokenizer;

    impl TokenizerAdapter for FixedTokenizer {
        fn encode(&self, _text: &str) -> Result<Vec<u32>> {
            Ok(vec![])
        }

        fn decode(&self, _ids: &[u32]) -> Result<String> {
            Ok(String::new())
        }

        fn id_to_token(&self, _id: u32) -> Option<String> {
            None
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
    fn reserved_count_matches_assembled_overhead() {
        let assembler = BlankInfillingAssembler::default();
        let tokens_a = [10, 2, 11];
        let tokens_b = [12, 13];
        let answer = [20, 21, 22];

        let input = assembler
            .assemble(&FixedTokenizer, &tokens_a, Some(&tokens_b), Some(&answer), 16)
            .unwrap();

        let used = input.padding_mask.iter().filter(|&&m| m == 1).count();
        let reserved = assembler.num_special_tokens(true, answer.len());
        assert_eq!(used, tokens_a.len() + tokens_b.len() + reserved);
    }

    #[test]
    fn span_positions_point_at_the_mask() {
        let assembler = BlankInfillingAssembler::default();
        // Mask sits at index 2 once the leading [CLS] is in place.
        let tokens_a = [10, 2, 11];
        let answer = [20, 21];

        let input = assembler
            .assemble(&FixedTokenizer, &tokens_a, None, Some(&answer), 10)
            .unwrap();

        assert_eq!(input.ids[..7], [0, 10, 2, 11, 4, 20, 3]);
        assert_eq!(input.position_ids[..6], [0, 1, 2, 3, 2, 2]);
        assert_eq!(input.target_ids[4], 20);
        assert_eq!(input.target_ids[5], 21);
        assert_eq!(input.loss_mask[..6], [0, 0, 0, 0, 1, 1]);
        assert_eq!(input.separator_mask[..6], [1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn missing_mask_is_rejected_when_a_span_is_requested() {
        let assembler = BlankInfillingAssembler::default();

        let err = assembler
            .assemble(&FixedTokenizer, &[10, 11], None, None, 8)
            .unwrap_err();
        assert!(matches!(err, PetError::MissingMask));
    }

    #[test]
    fn over_length_input_is_an_invariant_error() {
        let assembler = BlankInfillingAssembler::default();

        let err = assembler
            .assemble(&FixedTokenizer, &[10, 2, 11, 12], None, None, 4)
            .unwrap_err();
        assert!(matches!(err, PetError::SequenceTooLong { .. }));
    }
}
