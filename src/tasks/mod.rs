//! Task catalog: pattern templates and verbalizers.
//!
//! Dispatch is a closed enum rather than trait objects. Tasks that share
//! templates delegate explicitly: CB reuses the RTE patterns for ids 0-3 and
//! the full Yelp task reuses the polarity templates.

mod classification;
mod superglue;

use crate::example::InputExample;
use crate::segment::FilledPattern;
use crate::{PetError, Result};

/// Every task with a built-in pattern-verbalizer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Agnews,
    Yahoo,
    Mnli,
    YelpPolarity,
    YelpFull,
    XStance,
    Rte,
    Cb,
    Wic,
    BoolQ,
    MultiRc,
    Copa,
    Wsc,
    Record,
}

impl Task {
    /// Look up a task by its dataset name. `ax-b` and `ax-g` share the RTE
    /// templates; the `xstance-*` variants share the X-Stance ones.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "agnews" => Ok(Task::Agnews),
            "yahoo" => Ok(Task::Yahoo),
            "mnli" => Ok(Task::Mnli),
            "yelp-polarity" => Ok(Task::YelpPolarity),
            "yelp-full" => Ok(Task::YelpFull),
            "xstance" | "xstance-de" | "xstance-fr" => Ok(Task::XStance),
            "rte" | "ax-b" | "ax-g" => Ok(Task::Rte),
            "cb" => Ok(Task::Cb),
            "wic" => Ok(Task::Wic),
            "boolq" => Ok(Task::BoolQ),
            "multirc" => Ok(Task::MultiRc),
            "copa" => Ok(Task::Copa),
            "wsc" => Ok(Task::Wsc),
            "record" => Ok(Task::Record),
            other => Err(PetError::UnknownTask(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Task::Agnews => "agnews",
            Task::Yahoo => "yahoo",
            Task::Mnli => "mnli",
            Task::YelpPolarity => "yelp-polarity",
            Task::YelpFull => "yelp-full",
            Task::XStance => "xstance",
            Task::Rte => "rte",
            Task::Cb => "cb",
            Task::Wic => "wic",
            Task::BoolQ => "boolq",
            Task::MultiRc => "multirc",
            Task::Copa => "copa",
            Task::Wsc => "wsc",
            Task::Record => "record",
        }
    }

    /// Whether answers span a variable number of tokens, requiring one
    /// encoding per candidate.
    pub fn is_multi_token(&self) -> bool {
        matches!(self, Task::Copa | Task::Wsc | Task::Record)
    }

    /// Apply the template selected by `pattern_id` to `example`, with
    /// `mask` standing in for the token to predict.
    pub fn get_parts(
        &self,
        example: &InputExample,
        pattern_id: usize,
        mask: &str,
    ) -> Result<FilledPattern> {
        match self {
            Task::Agnews => classification::agnews::parts(example, pattern_id, mask),
            Task::Yahoo => classification::yahoo::parts(example, pattern_id, mask),
            Task::Mnli => classification::mnli::parts(example, pattern_id, mask),
            Task::YelpPolarity => classification::yelp_polarity::parts(example, pattern_id, mask),
            Task::YelpFull => classification::yelp_full::parts(example, pattern_id, mask),
            Task::XStance => classification::xstance::parts(example, pattern_id, mask),
            Task::Rte => superglue::rte::parts(example, pattern_id, mask),
            Task::Cb => superglue::cb::parts(example, pattern_id, mask),
            Task::Wic => superglue::wic::parts(example, pattern_id, mask),
            Task::BoolQ => superglue::boolq::parts(example, pattern_id, mask),
            Task::MultiRc => superglue::multirc::parts(example, pattern_id, mask),
            Task::Copa => superglue::copa::parts(example, pattern_id, mask),
            Task::Wsc => superglue::wsc::parts(example, pattern_id, mask),
            Task::Record => superglue::record::parts(example, pattern_id, mask),
        }
    }

    /// All verbalizations of `label` under `pattern_id`. Empty for tasks
    /// whose answer candidates come from the example itself.
    pub fn verbalize(&self, label: &str, pattern_id: usize) -> Result<Vec<String>> {
        match self {
            Task::Agnews => classification::agnews::verbalize(label),
            Task::Yahoo => classification::yahoo::verbalize(label),
            Task::Mnli => classification::mnli::verbalize(label, pattern_id),
            Task::YelpPolarity => classification::yelp_polarity::verbalize(label),
            Task::YelpFull => classification::yelp_full::verbalize(label),
            Task::XStance => classification::xstance::verbalize(label, pattern_id),
            Task::Rte => superglue::rte::verbalize(label, pattern_id),
            Task::Cb => superglue::cb::verbalize(label, pattern_id),
            Task::Wic => superglue::wic::verbalize(label, pattern_id),
            Task::BoolQ => superglue::boolq::verbalize(label, pattern_id),
            Task::MultiRc => superglue::multirc::verbalize(label, pattern_id),
            Task::Copa | Task::Wsc | Task::Record => Ok(Vec::new()),
        }
    }

    /// Candidate answer strings for multi-token tasks; empty otherwise.
    pub fn get_answers(&self, example: &InputExample) -> Result<Vec<String>> {
        match self {
            Task::Copa => superglue::copa::answers(example),
            Task::Wsc => superglue::wsc::answers(example),
            Task::Record => superglue::record::answers(example),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MASK: &str = "[MASK]";

    fn example(value: serde_json::Value) -> InputExample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn task_names_round_trip() {
        for name in [
            "agnews",
            "yahoo",
            "mnli",
            "yelp-polarity",
            "yelp-full",
            "xstance",
            "rte",
            "cb",
            "wic",
            "boolq",
            "multirc",
            "copa",
            "wsc",
            "record",
        ] {
            assert_eq!(Task::from_name(name).unwrap().name(), name);
        }
        assert!(matches!(
            Task::from_name("squad"),
            Err(PetError::UnknownTask(_))
        ));
    }

    #[test]
    fn aliases_map_to_shared_templates() {
        assert_eq!(Task::from_name("ax-b").unwrap(), Task::Rte);
        assert_eq!(Task::from_name("ax-g").unwrap(), Task::Rte);
        assert_eq!(Task::from_name("xstance-de").unwrap(), Task::XStance);
        assert_eq!(Task::from_name("xstance-fr").unwrap(), Task::XStance);
    }

    #[test]
    fn undefined_pattern_ids_fail() {
        let ex = example(json!({
            "guid": "ag-0", "text_a": "headline", "text_b": "body", "label": "1"
        }));
        assert!(matches!(
            Task::Agnews.get_parts(&ex, 6, MASK),
            Err(PetError::UnknownPattern { task: "agnews", pattern_id: 6 })
        ));
        assert!(matches!(
            Task::Record.get_parts(&ex, 1, MASK),
            Err(PetError::UnknownPattern { task: "record", pattern_id: 1 })
        ));
    }

    #[test]
    fn rte_pattern_0_places_the_hypothesis_first() {
        let ex = example(json!({
            "guid": "rte-0",
            "text_a": "Dogs bark loudly.",
            "text_b": "Dogs make noise.",
            "label": "entailment"
        }));
        let pattern = Task::Rte.get_parts(&ex, 0, MASK).unwrap();

        assert_eq!(pattern.part_a[1].text(), "Dogs make noise");
        assert!(pattern.part_a[1].is_shortenable());
        assert_eq!(pattern.part_b[0].text(), MASK);
        assert!(!pattern.part_b[0].is_shortenable());
        assert_eq!(pattern.part_b[2].text(), "Dogs bark loudly.");
    }

    #[test]
    fn cb_delegates_shared_patterns_to_rte() {
        let ex = example(json!({
            "guid": "cb-0",
            "text_a": "It rained all day.",
            "text_b": "The ground is wet.",
            "label": "entailment"
        }));

        let cb = Task::Cb.get_parts(&ex, 1, MASK).unwrap();
        let rte = Task::Rte.get_parts(&ex, 1, MASK).unwrap();
        assert_eq!(cb, rte);

        let own = Task::Cb.get_parts(&ex, 4, MASK).unwrap();
        assert_ne!(own, rte);
        assert_eq!(
            Task::Cb.verbalize("neutral", 4).unwrap(),
            vec!["neither".to_string()]
        );
        assert_eq!(
            Task::Cb.verbalize("neutral", 0).unwrap(),
            vec!["Maybe".to_string()]
        );
    }

    #[test]
    fn yelp_full_reuses_polarity_templates() {
        let ex = example(json!({
            "guid": "yp-0", "text_a": "Great food.", "label": "5"
        }));

        assert_eq!(
            Task::YelpFull.get_parts(&ex, 1, MASK).unwrap(),
            Task::YelpPolarity.get_parts(&ex, 1, MASK).unwrap()
        );
        assert_eq!(
            Task::YelpFull.verbalize("5", 1).unwrap(),
            vec!["great".to_string()]
        );
    }

    #[test]
    fn xstance_verbalizes_by_language_range() {
        assert_eq!(
            Task::XStance.verbalize("FAVOR", 0).unwrap(),
            vec!["Ja".to_string()]
        );
        assert_eq!(
            Task::XStance.verbalize("AGAINST", 3).unwrap(),
            vec!["No".to_string()]
        );
        assert_eq!(
            Task::XStance.verbalize("FAVOR", 5).unwrap(),
            vec!["Oui".to_string()]
        );
    }

    #[test]
    fn copa_validates_the_question_kind() {
        let ex = example(json!({
            "guid": "copa-0",
            "text_a": "The man fell.",
            "label": "0",
            "meta": {"choice1": "He tripped.", "choice2": "He flew.", "question": "maybe"}
        }));
        assert!(matches!(
            Task::Copa.get_parts(&ex, 0, MASK),
            Err(PetError::InvalidMeta { .. })
        ));
    }

    #[test]
    fn copa_answers_are_cleaned() {
        let ex = example(json!({
            "guid": "copa-1",
            "text_a": "The man fell.",
            "label": "0",
            "meta": {"choice1": "He tripped.", "choice2": "The Wind blew!", "question": "cause"}
        }));
        assert_eq!(
            Task::Copa.get_answers(&ex).unwrap(),
            vec!["he tripped".to_string(), "the Wind blew".to_string()]
        );
    }

    #[test]
    fn wsc_marks_the_pronoun() {
        let ex = example(json!({
            "guid": "wsc-0",
            "text_a": "Mark told Pete because he was sorry.",
            "label": "True",
            "meta": {"span1_text": "Mark", "span2_text": "he", "span2_index": 4}
        }));
        let pattern = Task::Wsc.get_parts(&ex, 0, MASK).unwrap();
        assert_eq!(
            pattern.part_a[0].text(),
            "Mark told Pete because *he* was sorry."
        );
        assert_eq!(
            pattern.part_a[1].text(),
            "The pronoun '*he*' refers to"
        );
    }

    #[test]
    fn wsc_rejects_an_out_of_range_pronoun_index() {
        let ex = example(json!({
            "guid": "wsc-1",
            "text_a": "Short text.",
            "label": "True",
            "meta": {"span1_text": "x", "span2_text": "he", "span2_index": 40}
        }));
        assert!(matches!(
            Task::Wsc.get_parts(&ex, 0, MASK),
            Err(PetError::InvalidMeta { .. })
        ));
    }

    #[test]
    fn record_requires_the_placeholder_marker() {
        let ex = example(json!({
            "guid": "rec-0",
            "text_a": "A long passage.",
            "text_b": "No marker here.",
            "label": ["0"],
            "meta": {"candidates": ["Paris", "London"]}
        }));
        assert!(matches!(
            Task::Record.get_parts(&ex, 0, MASK),
            Err(PetError::MissingPlaceholder(_))
        ));

        let ex = example(json!({
            "guid": "rec-1",
            "text_a": "A long passage.",
            "text_b": "The capital is @placeholder.",
            "label": ["0"],
            "meta": {"candidates": ["Paris", "London"]}
        }));
        let pattern = Task::Record.get_parts(&ex, 0, MASK).unwrap();
        assert_eq!(pattern.part_a[1].text(), "The capital is [MASK] .");
    }

    #[test]
    fn multi_token_tasks_have_no_fixed_verbalizer() {
        for task in [Task::Copa, Task::Wsc, Task::Record] {
            assert!(task.is_multi_token());
            assert!(task.verbalize("0", 0).unwrap().is_empty());
        }
        assert!(!Task::Rte.is_multi_token());
    }
}
