//! The `encode` orchestrator tying templates, truncation and assembly
//! together.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::example::{InputExample, Label};
use crate::sample::{
    BlankInfillingAssembler, Encoded, InputLayout, LabelIndex, MultiTokenSample, SampleAssembler,
    SingleTokenSample,
};
use crate::segment::{Segment, TokenSegment};
use crate::tasks::Task;
use crate::tokenizer::TokenizerAdapter;
use crate::truncate;
use crate::verbalizer::{single_verbalization_id, verbalization_ids, VerbalizerFile};
use crate::{PetError, Result};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Encodes [`InputExample`]s for one task into model-ready samples.
///
/// An encoder is configured once (task, label vocabulary, pattern id,
/// maximum sequence length) and then applied to any number of examples.
/// `encode` never mutates shared state, so one encoder can serve concurrent
/// callers as long as the tokenizer does.
pub struct PvpEncoder<T: TokenizerAdapter, A: SampleAssembler = BlankInfillingAssembler> {
    task: Task,
    tokenizer: T,
    assembler: A,
    label_list: Vec<String>,
    max_seq_length: usize,
    pattern_id: usize,
    verbalizer_file: Option<VerbalizerFile>,
    rng: StdRng,
}

/// Builder for [`PvpEncoder`].
pub struct PvpEncoderBuilder<T: TokenizerAdapter> {
    task: Task,
    tokenizer: T,
    label_list: Vec<String>,
    max_seq_length: usize,
    pattern_id: usize,
    verbalizer_file: Option<VerbalizerFile>,
    layout: InputLayout,
    seed: u64,
}

impl<T: TokenizerAdapter> PvpEncoderBuilder<T> {
    pub fn new(
        task: Task,
        tokenizer: T,
        label_list: impl IntoIterator<Item = impl Into<String>>,
        max_seq_length: usize,
    ) -> Self {
        Self {
            task,
            tokenizer,
            label_list: label_list.into_iter().map(Into::into).collect(),
            max_seq_length,
            pattern_id: 0,
            verbalizer_file: None,
            layout: InputLayout::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Select one of the task's alternative template phrasings.
    pub fn pattern_id(mut self, pattern_id: usize) -> Self {
        self.pattern_id = pattern_id;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Verbalizations loaded from a file override the task's built-in
    /// mapping. Load with [`VerbalizerFile::load`] and inject the value; the
    /// encoder itself never touches the filesystem.
    pub fn verbalizer(mut self, file: VerbalizerFile) -> Self {
        self.verbalizer_file = Some(file);
        self
    }

    pub fn layout(mut self, layout: InputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> PvpEncoder<T> {
        let assembler = BlankInfillingAssembler::new(self.layout);
        self.build_with_assembler(assembler)
    }

    /// Build with a custom sample-assembly boundary.
    pub fn build_with_assembler<A: SampleAssembler>(self, assembler: A) -> PvpEncoder<T, A> {
        PvpEncoder {
            task: self.task,
            tokenizer: self.tokenizer,
            assembler,
            label_list: self.label_list,
            max_seq_length: self.max_seq_length,
            pattern_id: self.pattern_id,
            verbalizer_file: self.verbalizer_file,
            rng: StdRng::seed_from_u64(self.seed),
        }
    }
}

impl<T: TokenizerAdapter> PvpEncoder<T> {
    pub fn builder(
        task: Task,
        tokenizer: T,
        label_list: impl IntoIterator<Item = impl Into<String>>,
        max_seq_length: usize,
    ) -> PvpEncoderBuilder<T> {
        PvpEncoderBuilder::new(task, tokenizer, label_list, max_seq_length)
    }
}

impl<T: TokenizerAdapter, A: SampleAssembler> PvpEncoder<T, A> {
    pub fn task(&self) -> Task {
        self.task
    }

    pub fn pattern_id(&self) -> usize {
        self.pattern_id
    }

    pub fn max_seq_length(&self) -> usize {
        self.max_seq_length
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Deterministic per-encoder random source for templates that shuffle
    /// example-level state. Two encoders with the same seed produce the same
    /// sequence.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Verbalizations for `label`, preferring the injected verbalizer file.
    pub fn verbalize(&self, label: &str) -> Result<Vec<String>> {
        match &self.verbalizer_file {
            Some(file) => Ok(file.get(self.pattern_id, label)),
            None => self.task.verbalize(label, self.pattern_id),
        }
    }

    /// Largest verbalization count across the label vocabulary.
    pub fn max_num_verbalizers(&self) -> Result<usize> {
        let mut max = 0;
        for label in &self.label_list {
            max = max.max(self.verbalize(label)?.len());
        }
        Ok(max)
    }

    /// Mark the first mask position with 1 and everything else with -1.
    /// Fails when the sequence carries no mask token.
    pub fn mask_positions(&self, input_ids: &[u32]) -> Result<Vec<i32>> {
        let mask_id = self.tokenizer.mask_id();
        let idx = input_ids
            .iter()
            .position(|&id| id == mask_id)
            .ok_or(PetError::MissingMask)?;
        let mut labels = vec![-1; input_ids.len()];
        labels[idx] = 1;
        Ok(labels)
    }

    /// Encode one example.
    ///
    /// With `priming` the result is a flat, unpadded id sequence suitable as
    /// an in-context demonstration; `labeled` additionally writes the
    /// label's verbalization over the mask slot. Standard encoding produces
    /// the structured fixed-width sample instead.
    pub fn encode(&self, example: &InputExample, priming: bool, labeled: bool) -> Result<Encoded> {
        if labeled && !priming {
            return Err(PetError::LabeledWithoutPriming);
        }

        let pattern = self
            .task
            .get_parts(example, self.pattern_id, self.tokenizer.mask_token())?;
        let mut parts_a = self.tokenize_parts(&pattern.part_a)?;
        let mut parts_b = self.tokenize_parts(&pattern.part_b)?;

        if self.task.is_multi_token() {
            return self.encode_multi_token(example, &parts_a, &parts_b);
        }

        let reserved = self.assembler.num_special_tokens(!parts_b.is_empty(), 0);
        truncate::truncate(&mut parts_a, &mut parts_b, reserved, self.max_seq_length)?;

        let tokens_a = flatten(&parts_a);
        let tokens_b = if parts_b.is_empty() {
            None
        } else {
            Some(flatten(&parts_b))
        };

        if priming {
            return self.encode_priming(example, tokens_a, tokens_b, labeled);
        }

        let input = self.assembler.assemble(
            &self.tokenizer,
            &tokens_a,
            tokens_b.as_deref(),
            None,
            self.max_seq_length,
        )?;
        let label = self.label_index(self.single_label(example)?)?;

        Ok(Encoded::Single(SingleTokenSample { input, label }))
    }

    fn encode_multi_token(
        &self,
        example: &InputExample,
        parts_a: &[TokenSegment],
        parts_b: &[TokenSegment],
    ) -> Result<Encoded> {
        let answers = self.task.get_answers(example)?;
        let mut choices = Vec::with_capacity(answers.len());

        for answer in &answers {
            // Each candidate truncates its own copy; the shared segments
            // stay intact for the candidates that follow.
            let mut this_a = parts_a.to_vec();
            let mut this_b = parts_b.to_vec();

            let answer_ids = verbalization_ids(answer, &self.tokenizer)?;
            let reserved = self
                .assembler
                .num_special_tokens(!this_b.is_empty(), answer_ids.len());
            truncate::truncate(&mut this_a, &mut this_b, reserved, self.max_seq_length)?;

            let tokens_a = flatten(&this_a);
            let tokens_b = if this_b.is_empty() {
                None
            } else {
                Some(flatten(&this_b))
            };
            let input = self.assembler.assemble(
                &self.tokenizer,
                &tokens_a,
                tokens_b.as_deref(),
                Some(&answer_ids),
                self.max_seq_length,
            )?;
            choices.push(input);
        }

        let label = match &example.label {
            Some(Label::Single(label)) => LabelIndex::Single(self.label_index(label)?),
            Some(Label::Multi(labels)) => LabelIndex::Multi(
                labels
                    .iter()
                    .map(|label| self.label_index(label))
                    .collect::<Result<_>>()?,
            ),
            None => return Err(PetError::MissingLabel(example.guid.clone())),
        };

        Ok(Encoded::MultiChoice(MultiTokenSample {
            choices,
            label,
            unique_id: example.guid.clone(),
        }))
    }

    fn encode_priming(
        &self,
        example: &InputExample,
        tokens_a: Vec<u32>,
        tokens_b: Option<Vec<u32>>,
        labeled: bool,
    ) -> Result<Encoded> {
        let mut input_ids = tokens_a;
        if let Some(tokens_b) = tokens_b {
            input_ids.extend(tokens_b);
        }

        if labeled {
            let mask_id = self.tokenizer.mask_id();
            let mask_idx = input_ids.iter().position(|&id| id == mask_id);
            if mask_idx != Some(1) {
                return Err(PetError::MaskPosition(mask_idx));
            }

            let verbalizations = self.verbalize(self.single_label(example)?)?;
            if verbalizations.len() != 1 {
                return Err(PetError::PrimingVerbalizations(verbalizations.len()));
            }
            input_ids[1] = single_verbalization_id(&verbalizations[0], &self.tokenizer)?;
        }

        Ok(Encoded::Priming(input_ids))
    }

    fn tokenize_parts(&self, segments: &[Segment]) -> Result<Vec<TokenSegment>> {
        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.text().is_empty() {
                continue;
            }
            let ids = self.tokenizer.encode(segment.text())?;
            if ids.is_empty() {
                continue;
            }
            parts.push(TokenSegment {
                ids,
                shortenable: segment.is_shortenable(),
            });
        }
        Ok(parts)
    }

    fn single_label<'a>(&self, example: &'a InputExample) -> Result<&'a str> {
        match &example.label {
            Some(Label::Single(label)) => Ok(label),
            Some(Label::Multi(_)) => Err(PetError::LabelCardinality),
            None => Err(PetError::MissingLabel(example.guid.clone())),
        }
    }

    fn label_index(&self, label: &str) -> Result<usize> {
        self.label_list
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| PetError::UnknownLabel(label.to_string()))
    }
}

fn flatten(parts: &[TokenSegment]) -> Vec<u32> {
    parts.iter().flat_map(|p| p.ids.iter().copied()).collect()
}
