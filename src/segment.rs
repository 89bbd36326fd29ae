//! Template segments and the text transforms available to templates.

/// Characters stripped by [`remove_final_punc`], matching ASCII punctuation.
const PUNCTUATION: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// Remove trailing punctuation marks.
pub fn remove_final_punc(s: &str) -> &str {
    s.trim_end_matches(PUNCTUATION)
}

/// Lowercase only the first character.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A piece of template text tagged with whether truncation may shorten it.
///
/// Every segment carries an explicit tag; literal template fragments and the
/// mask token are fixed, example text is usually shortenable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    shortenable: bool,
}

impl Segment {
    /// A literal template fragment that must never be truncated.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shortenable: false,
        }
    }

    /// A segment eligible for truncation.
    pub fn shortenable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shortenable: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_shortenable(&self) -> bool {
        self.shortenable
    }

    /// Strip trailing punctuation, keeping the shortenable tag.
    pub fn without_final_punc(self) -> Self {
        Self {
            text: remove_final_punc(&self.text).to_string(),
            shortenable: self.shortenable,
        }
    }

    /// Lowercase the first character, keeping the shortenable tag.
    pub fn lowercase_first(self) -> Self {
        Self {
            text: lowercase_first(&self.text),
            shortenable: self.shortenable,
        }
    }
}

/// The two ordered segment sequences produced by a task template. Part B is
/// empty for single-sequence tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilledPattern {
    pub part_a: Vec<Segment>,
    pub part_b: Vec<Segment>,
}

/// A segment after tokenization, as consumed by the truncation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSegment {
    pub ids: Vec<u32>,
    pub shortenable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_final_punc_strips_all_trailing_marks() {
        assert_eq!(remove_final_punc("It rained."), "It rained");
        assert_eq!(remove_final_punc("Really?!"), "Really");
        assert_eq!(remove_final_punc("no marks"), "no marks");
        assert_eq!(remove_final_punc(""), "");
    }

    #[test]
    fn lowercase_first_only_touches_the_first_char() {
        assert_eq!(lowercase_first("The Sun rose"), "the Sun rose");
        assert_eq!(lowercase_first("x"), "x");
        assert_eq!(lowercase_first(""), "");
    }

    #[test]
    fn transforms_preserve_the_shortenable_tag() {
        let seg = Segment::shortenable("The premise.").without_final_punc();
        assert!(seg.is_shortenable());
        assert_eq!(seg.text(), "The premise");

        let seg = Segment::fixed("Choice One").lowercase_first();
        assert!(!seg.is_shortenable());
        assert_eq!(seg.text(), "choice One");
    }
}
