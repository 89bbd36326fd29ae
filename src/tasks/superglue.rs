//! Templates for the SuperGLUE tasks.

use crate::example::InputExample;
use crate::segment::{lowercase_first, remove_final_punc, FilledPattern, Segment};
use crate::{PetError, Result};

fn text_b(example: &InputExample) -> &str {
    example.text_b.as_deref().unwrap_or("")
}

pub(crate) mod rte {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        // The hypothesis comes first in patterns 0-3.
        let premise = Segment::shortenable(example.text_a.as_str());
        let hypothesis = Segment::shortenable(remove_final_punc(super::text_b(example)));

        match pattern_id {
            0 => Ok(FilledPattern {
                part_a: vec![Segment::fixed("\""), hypothesis, Segment::fixed("\" ?")],
                part_b: vec![
                    Segment::fixed(mask),
                    Segment::fixed(", \""),
                    premise,
                    Segment::fixed("\""),
                ],
            }),
            1 => Ok(FilledPattern {
                part_a: vec![hypothesis, Segment::fixed("?")],
                part_b: vec![Segment::fixed(mask), Segment::fixed(","), premise],
            }),
            2 => Ok(FilledPattern {
                part_a: vec![Segment::fixed("\""), hypothesis, Segment::fixed("\" ?")],
                part_b: vec![
                    Segment::fixed(mask),
                    Segment::fixed(". \""),
                    premise,
                    Segment::fixed("\""),
                ],
            }),
            3 => Ok(FilledPattern {
                part_a: vec![hypothesis, Segment::fixed("?")],
                part_b: vec![Segment::fixed(mask), Segment::fixed("."), premise],
            }),
            4 => Ok(FilledPattern {
                part_a: vec![
                    premise,
                    Segment::fixed(" question: "),
                    Segment::shortenable(super::text_b(example)),
                    Segment::fixed(" True or False? answer:"),
                    Segment::fixed(mask),
                ],
                part_b: Vec::new(),
            }),
            _ => Err(PetError::UnknownPattern {
                task: "rte",
                pattern_id,
            }),
        }
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        if pattern_id == 4 {
            let word = if label == "entailment" { "true" } else { "false" };
            return Ok(vec![word.to_string()]);
        }
        let word = match label {
            "entailment" => "Yes",
            "not_entailment" => "No",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod cb {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        if pattern_id == 4 {
            let text_a = Segment::shortenable(example.text_a.as_str());
            let text_b = Segment::shortenable(super::text_b(example));
            return Ok(FilledPattern {
                part_a: vec![
                    text_a,
                    Segment::fixed(" question: "),
                    text_b,
                    Segment::fixed(" true, false or neither? answer:"),
                    Segment::fixed(mask),
                ],
                part_b: Vec::new(),
            });
        }
        // Patterns 0-3 are shared with RTE.
        rte::parts(example, pattern_id, mask)
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        if pattern_id == 4 {
            let word = match label {
                "entailment" => "true",
                "contradiction" => "false",
                _ => "neither",
            };
            return Ok(vec![word.to_string()]);
        }
        let word = match label {
            "contradiction" => "No",
            "entailment" => "Yes",
            "neutral" => "Maybe",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod boolq {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let passage = Segment::shortenable(example.text_a.as_str());
        let question = Segment::shortenable(super::text_b(example));

        let part_a = match pattern_id {
            0 | 1 => vec![
                passage,
                Segment::fixed(". Question: "),
                question,
                Segment::fixed("? Answer: "),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            2 | 3 => vec![
                passage,
                Segment::fixed(". Based on the previous passage, "),
                question,
                Segment::fixed("?"),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            4 | 5 => vec![
                Segment::fixed("Based on the following passage, "),
                question,
                Segment::fixed("?"),
                Segment::fixed(mask),
                Segment::fixed("."),
                passage,
            ],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "boolq",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        let word = if pattern_id % 2 == 0 {
            match label {
                "True" => "Yes",
                "False" => "No",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        } else {
            match label {
                "True" => "true",
                "False" => "false",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod wic {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text_a = Segment::shortenable(example.text_a.as_str());
        let text_b = Segment::shortenable(super::text_b(example));
        let word = example.meta_str("word")?;

        let part_a = match pattern_id {
            0 => vec![
                Segment::fixed("\""),
                text_a,
                Segment::fixed("\" / \""),
                text_b,
                Segment::fixed(format!("\" Similar sense of \"{word}\"?")),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            1 => vec![
                text_a,
                text_b,
                Segment::fixed(format!(
                    "Does {word} have the same meaning in both sentences?"
                )),
                Segment::fixed(mask),
            ],
            2 => vec![
                Segment::fixed(word),
                Segment::fixed(" . Sense (1) (a) \""),
                text_a,
                Segment::fixed("\" ("),
                Segment::fixed(mask),
                Segment::fixed(") \""),
                text_b,
                Segment::fixed("\""),
            ],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "wic",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        let word = if pattern_id == 2 {
            match label {
                "T" => "b",
                "F" => "2",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        } else {
            match label {
                "T" => "Yes",
                "F" => "No",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod multirc {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let passage = Segment::shortenable(example.text_a.as_str());
        let question = super::text_b(example);
        let answer = example.meta_str("answer")?;

        let part_a = match pattern_id {
            0 => vec![
                passage,
                Segment::fixed(". Question: "),
                Segment::fixed(question),
                Segment::fixed("? Is it "),
                Segment::fixed(answer),
                Segment::fixed("?"),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            1 => vec![
                passage,
                Segment::fixed(". Question: "),
                Segment::fixed(question),
                Segment::fixed("? Is the correct answer \""),
                Segment::fixed(answer),
                Segment::fixed("\"?"),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            2 => vec![
                passage,
                Segment::fixed(". Based on the previous passage, "),
                Segment::fixed(question),
                Segment::fixed("? Is \""),
                Segment::fixed(answer),
                Segment::fixed("\" a correct answer?"),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            3 => vec![
                passage,
                Segment::fixed(question),
                Segment::fixed("- ["),
                Segment::fixed(mask),
                Segment::fixed("]"),
                Segment::fixed(answer),
            ],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "multirc",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        let word = if pattern_id == 3 {
            match label {
                "0" => "False",
                "1" => "True",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        } else {
            match label {
                "0" => "No",
                "1" => "Yes",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod wsc {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let pronoun = example.meta_str("span2_text")?;
        let pronoun_idx = example.meta_usize("span2_index")?;

        let mut words: Vec<String> = example
            .text_a
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if pronoun_idx >= words.len() {
            return Err(PetError::InvalidMeta {
                field: "span2_index".to_string(),
                expected: "an index within text_a",
            });
        }
        words[pronoun_idx] = format!("*{}*", words[pronoun_idx]);
        let text_a = Segment::shortenable(words.join(" "));

        let part_a = match pattern_id {
            0 => vec![
                text_a,
                Segment::fixed(format!("The pronoun '*{pronoun}*' refers to")),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            1 => vec![
                text_a,
                Segment::fixed(format!(
                    "In the previous sentence, the pronoun '*{pronoun}*' refers to"
                )),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            2 => vec![
                text_a,
                Segment::fixed(format!(
                    "Question: In the passage above, what does the pronoun '*{pronoun}*' refer to? Answer: "
                )),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "wsc",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn answers(example: &InputExample) -> Result<Vec<String>> {
        Ok(vec![example.meta_str("span1_text")?.to_string()])
    }
}

pub(crate) mod copa {
    use super::*;

    fn clean_choice(s: &str) -> String {
        remove_final_punc(&lowercase_first(s)).to_string()
    }

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let premise = Segment::shortenable(example.text_a.as_str()).without_final_punc();
        let choice1 = clean_choice(example.meta_str("choice1")?);
        let choice2 = clean_choice(example.meta_str("choice2")?);

        let question = example.meta_str("question")?;
        let joiner = match question {
            "cause" => "because",
            "effect" => ", so",
            _ => {
                return Err(PetError::InvalidMeta {
                    field: "question".to_string(),
                    expected: "\"cause\" or \"effect\"",
                })
            }
        };

        let part_a = match pattern_id {
            0 => vec![
                Segment::fixed("\""),
                Segment::fixed(choice1),
                Segment::fixed("\" or \""),
                Segment::fixed(choice2),
                Segment::fixed("\"?"),
                premise,
                Segment::fixed(joiner),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            1 => vec![
                Segment::fixed(choice1),
                Segment::fixed("or"),
                Segment::fixed(choice2),
                Segment::fixed("?"),
                premise,
                Segment::fixed(joiner),
                Segment::fixed(mask),
                Segment::fixed("."),
            ],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "copa",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn answers(example: &InputExample) -> Result<Vec<String>> {
        Ok(vec![
            clean_choice(example.meta_str("choice1")?),
            clean_choice(example.meta_str("choice2")?),
        ])
    }
}

pub(crate) mod record {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        if pattern_id != 0 {
            return Err(PetError::UnknownPattern {
                task: "record",
                pattern_id,
            });
        }

        let premise = Segment::shortenable(example.text_a.as_str());
        let question = super::text_b(example);
        if !question.contains("@placeholder") {
            return Err(PetError::MissingPlaceholder(question.to_string()));
        }
        let question = question.replace("@placeholder", &format!("{mask} "));

        Ok(FilledPattern {
            part_a: vec![premise, Segment::fixed(question)],
            part_b: Vec::new(),
        })
    }

    pub fn answers(example: &InputExample) -> Result<Vec<String>> {
        example.meta_str_list("candidates")
    }
}
