//! Templates for the text-classification and NLI tasks.

use crate::example::InputExample;
use crate::segment::{remove_final_punc, FilledPattern, Segment};
use crate::{PetError, Result};

fn text_b(example: &InputExample) -> &str {
    example.text_b.as_deref().unwrap_or("")
}

pub(crate) mod agnews {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text_a = Segment::shortenable(example.text_a.as_str());
        let text_b = Segment::shortenable(super::text_b(example));

        let part_a = match pattern_id {
            0 => vec![Segment::fixed(mask), Segment::fixed(":"), text_a, text_b],
            1 => vec![Segment::fixed(mask), Segment::fixed("News:"), text_a, text_b],
            2 => vec![
                text_a,
                Segment::fixed("("),
                Segment::fixed(mask),
                Segment::fixed(")"),
                text_b,
            ],
            3 => vec![
                text_a,
                text_b,
                Segment::fixed("("),
                Segment::fixed(mask),
                Segment::fixed(")"),
            ],
            4 => vec![
                Segment::fixed("[ Category:"),
                Segment::fixed(mask),
                Segment::fixed("]"),
                text_a,
                text_b,
            ],
            5 => vec![Segment::fixed(mask), Segment::fixed("-"), text_a, text_b],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "agnews",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn verbalize(label: &str) -> Result<Vec<String>> {
        let word = match label {
            "1" => "World",
            "2" => "Sports",
            "3" => "Business",
            "4" => "Tech",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod yahoo {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text_a = Segment::shortenable(example.text_a.as_str());
        let text_b = Segment::shortenable(super::text_b(example));

        let part_a = match pattern_id {
            0 => vec![Segment::fixed(mask), Segment::fixed(":"), text_a, text_b],
            1 => vec![
                Segment::fixed(mask),
                Segment::fixed("Question:"),
                text_a,
                text_b,
            ],
            2 => vec![
                text_a,
                Segment::fixed("("),
                Segment::fixed(mask),
                Segment::fixed(")"),
                text_b,
            ],
            3 => vec![
                text_a,
                text_b,
                Segment::fixed("("),
                Segment::fixed(mask),
                Segment::fixed(")"),
            ],
            4 => vec![
                Segment::fixed("[ Category:"),
                Segment::fixed(mask),
                Segment::fixed("]"),
                text_a,
                text_b,
            ],
            5 => vec![Segment::fixed(mask), Segment::fixed("-"), text_a, text_b],
            _ => {
                return Err(PetError::UnknownPattern {
                    task: "yahoo",
                    pattern_id,
                })
            }
        };
        Ok(FilledPattern {
            part_a,
            part_b: Vec::new(),
        })
    }

    pub fn verbalize(label: &str) -> Result<Vec<String>> {
        let word = match label {
            "1" => "Society",
            "2" => "Science",
            "3" => "Health",
            "4" => "Education",
            "5" => "Computer",
            "6" => "Sports",
            "7" => "Business",
            "8" => "Entertainment",
            "9" => "Relationship",
            "10" => "Politics",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod mnli {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text_a = Segment::shortenable(remove_final_punc(example.text_a.as_str()));
        let text_b = Segment::shortenable(super::text_b(example));

        match pattern_id {
            0 | 2 => Ok(FilledPattern {
                part_a: vec![Segment::fixed("\""), text_a, Segment::fixed("\" ?")],
                part_b: vec![
                    Segment::fixed(mask),
                    Segment::fixed(", \""),
                    text_b,
                    Segment::fixed("\""),
                ],
            }),
            1 | 3 => Ok(FilledPattern {
                part_a: vec![text_a, Segment::fixed("?")],
                part_b: vec![Segment::fixed(mask), Segment::fixed(","), text_b],
            }),
            _ => Err(PetError::UnknownPattern {
                task: "mnli",
                pattern_id,
            }),
        }
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        let word = if pattern_id < 2 {
            match label {
                "contradiction" => "Wrong",
                "entailment" => "Right",
                "neutral" => "Maybe",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        } else {
            match label {
                "contradiction" => "No",
                "entailment" => "Yes",
                "neutral" => "Maybe",
                _ => return Err(PetError::UnknownLabel(label.to_string())),
            }
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod yelp_polarity {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text = Segment::shortenable(example.text_a.as_str());

        match pattern_id {
            0 => Ok(FilledPattern {
                part_a: vec![
                    Segment::fixed("It was"),
                    Segment::fixed(mask),
                    Segment::fixed("."),
                    text,
                ],
                part_b: Vec::new(),
            }),
            1 => Ok(FilledPattern {
                part_a: vec![
                    text,
                    Segment::fixed(". All in all, it was"),
                    Segment::fixed(mask),
                    Segment::fixed("."),
                ],
                part_b: Vec::new(),
            }),
            2 => Ok(FilledPattern {
                part_a: vec![
                    Segment::fixed("Just"),
                    Segment::fixed(mask),
                    Segment::fixed("!"),
                ],
                part_b: vec![text],
            }),
            3 => Ok(FilledPattern {
                part_a: vec![text],
                part_b: vec![
                    Segment::fixed("In summary, the restaurant is"),
                    Segment::fixed(mask),
                    Segment::fixed("."),
                ],
            }),
            _ => Err(PetError::UnknownPattern {
                task: "yelp-polarity",
                pattern_id,
            }),
        }
    }

    pub fn verbalize(label: &str) -> Result<Vec<String>> {
        let word = match label {
            "1" => "bad",
            "2" => "good",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod yelp_full {
    use super::*;

    // Shares the polarity templates; only the verbalizer differs.
    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        yelp_polarity::parts(example, pattern_id, mask)
    }

    pub fn verbalize(label: &str) -> Result<Vec<String>> {
        let word = match label {
            "1" => "terrible",
            "2" => "bad",
            "3" => "okay",
            "4" => "good",
            "5" => "great",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}

pub(crate) mod xstance {
    use super::*;

    pub fn parts(example: &InputExample, pattern_id: usize, mask: &str) -> Result<FilledPattern> {
        let text_a = Segment::shortenable(example.text_a.as_str());
        let text_b = Segment::shortenable(super::text_b(example));

        match pattern_id {
            0 | 2 | 4 => Ok(FilledPattern {
                part_a: vec![Segment::fixed("\""), text_a, Segment::fixed("\"")],
                part_b: vec![
                    Segment::fixed(mask),
                    Segment::fixed(". \""),
                    text_b,
                    Segment::fixed("\""),
                ],
            }),
            1 | 3 | 5 => Ok(FilledPattern {
                part_a: vec![text_a],
                part_b: vec![Segment::fixed(mask), Segment::fixed("."), text_b],
            }),
            _ => Err(PetError::UnknownPattern {
                task: "xstance",
                pattern_id,
            }),
        }
    }

    pub fn verbalize(label: &str, pattern_id: usize) -> Result<Vec<String>> {
        // Pattern ids select the language: 0-1 German, 2-3 English, 4-5 French.
        let word = match (pattern_id, label) {
            (0 | 1, "FAVOR") => "Ja",
            (0 | 1, "AGAINST") => "Nein",
            (2 | 3, "FAVOR") => "Yes",
            (2 | 3, "AGAINST") => "No",
            (_, "FAVOR") => "Oui",
            (_, "AGAINST") => "Non",
            _ => return Err(PetError::UnknownLabel(label.to_string())),
        };
        Ok(vec![word.to_string()])
    }
}
