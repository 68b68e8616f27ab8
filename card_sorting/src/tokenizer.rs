use log::debug;

use crate::config::{CardSortErrors, Element};

/// Element names that contain the delimiter and must not be split.
pub const DEFAULT_PROTECTED_PHRASES: [&str; 2] = [
    "Degrees, Majors, Minors, and Certificates Declared",
    "Register, Add, or Drop Classes",
];

// A piece of the raw text once the protected phrases have been located.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Segment<'a> {
    Text(&'a str),
    // Index in the list of protected phrases.
    Protected(usize),
}

/// Splits the content of a cell into elements.
///
/// The protected phrases are matched literally, in registration order, before the
/// text is split on the delimiter. A phrase that does not appear verbatim is not
/// protected. Matching is substring based and ignores token boundaries: a phrase
/// glued to other text without a delimiter stays whole inside the larger element.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Tokenizer {
    delimiter: char,
    phrases: Vec<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            delimiter: Tokenizer::DELIMITER,
            phrases: DEFAULT_PROTECTED_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Tokenizer {
    pub const DELIMITER: char = ',';

    /// A tokenizer without any protected phrase.
    pub fn new() -> Tokenizer {
        Tokenizer {
            delimiter: Tokenizer::DELIMITER,
            phrases: Vec::new(),
        }
    }

    pub fn with_phrases(phrases: &[String]) -> Result<Tokenizer, CardSortErrors> {
        let mut res = Tokenizer::new();
        for p in phrases {
            res.protect(p)?;
        }
        Ok(res)
    }

    /// Registers one more protected phrase. Phrases already known are ignored.
    pub fn protect(&mut self, phrase: &str) -> Result<(), CardSortErrors> {
        if phrase.trim().is_empty() {
            return Err(CardSortErrors::EmptyProtectedPhrase);
        }
        if !self.phrases.iter().any(|p| p == phrase) {
            self.phrases.push(phrase.to_string());
        }
        Ok(())
    }

    pub fn protected_phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Splits a cell into its elements, in order of appearance.
    ///
    /// An absent or blank cell has no element. No returned element is empty.
    pub fn tokenize(&self, raw: Option<&str>) -> Vec<Element> {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Vec::new(),
        };

        let segments = self.locate_phrases(raw);

        // The protected phrases are pasted back as-is into the piece being built,
        // so that their delimiters never start a new piece.
        let mut pieces: Vec<String> = vec![String::new()];
        for seg in segments {
            match seg {
                Segment::Text(text) => {
                    let mut parts = text.split(self.delimiter);
                    if let (Some(first), Some(last)) = (parts.next(), pieces.last_mut()) {
                        last.push_str(first);
                    }
                    pieces.extend(parts.map(|s| s.to_string()));
                }
                Segment::Protected(idx) => {
                    if let Some(last) = pieces.last_mut() {
                        last.push_str(&self.phrases[idx]);
                    }
                }
            }
        }

        let res: Vec<Element> = pieces
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Element::new)
            .collect();
        debug!("tokenize: raw: {:?} elements: {:?}", raw, res);
        res
    }

    fn locate_phrases<'a>(&self, raw: &'a str) -> Vec<Segment<'a>> {
        let mut segments = vec![Segment::Text(raw)];
        for (idx, phrase) in self.phrases.iter().enumerate() {
            let mut next: Vec<Segment<'a>> = Vec::with_capacity(segments.len());
            for seg in segments {
                match seg {
                    Segment::Text(text) => {
                        let mut rest = text;
                        while let Some(pos) = rest.find(phrase.as_str()) {
                            if pos > 0 {
                                next.push(Segment::Text(&rest[..pos]));
                            }
                            next.push(Segment::Protected(idx));
                            rest = &rest[pos + phrase.len()..];
                        }
                        if !rest.is_empty() {
                            next.push(Segment::Text(rest));
                        }
                    }
                    protected => next.push(protected),
                }
            }
            segments = next;
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(names: &[&str]) -> Vec<Element> {
        names.iter().map(|s| Element::new(s)).collect()
    }

    #[test]
    fn empty_and_blank_cells() {
        let t = Tokenizer::default();
        assert!(t.tokenize(None).is_empty());
        assert!(t.tokenize(Some("")).is_empty());
        assert!(t.tokenize(Some("   \t\n")).is_empty());
        assert!(t.tokenize(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn splits_and_trims() {
        let t = Tokenizer::default();
        assert_eq!(
            t.tokenize(Some(" Grades ,Finances,  Holds,")),
            elements(&["Grades", "Finances", "Holds"])
        );
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let t = Tokenizer::new();
        assert_eq!(
            t.tokenize(Some("B, A, B")),
            elements(&["B", "A", "B"])
        );
    }

    #[test]
    fn protected_phrase_is_not_split() {
        let t = Tokenizer::default();
        let res = t.tokenize(Some(
            "Degrees, Majors, Minors, and Certificates Declared, Math",
        ));
        assert_eq!(
            res,
            elements(&["Degrees, Majors, Minors, and Certificates Declared", "Math"])
        );
    }

    #[test]
    fn protected_phrases_anywhere_in_the_text() {
        let t = Tokenizer::default();
        let res = t.tokenize(Some(
            "Holds,Register, Add, or Drop Classes , Degrees, Majors, Minors, and Certificates Declared",
        ));
        assert_eq!(
            res,
            elements(&[
                "Holds",
                "Register, Add, or Drop Classes",
                "Degrees, Majors, Minors, and Certificates Declared",
            ])
        );
        let twice = t.tokenize(Some(
            "Register, Add, or Drop Classes, Register, Add, or Drop Classes",
        ));
        assert_eq!(
            twice,
            elements(&[
                "Register, Add, or Drop Classes",
                "Register, Add, or Drop Classes"
            ])
        );
    }

    #[test]
    fn phrase_not_verbatim_is_not_protected() {
        let t = Tokenizer::default();
        assert_eq!(
            t.tokenize(Some("Register,Add, or Drop Classes")),
            elements(&["Register", "Add", "or Drop Classes"])
        );
    }

    #[test]
    fn phrase_glued_to_other_text() {
        // Substring matching does not look at token boundaries: the phrase stays whole
        // but is absorbed in the surrounding element.
        let t = Tokenizer::default();
        assert_eq!(
            t.tokenize(Some("MyRegister, Add, or Drop Classes, Math")),
            elements(&["MyRegister, Add, or Drop Classes", "Math"])
        );
    }

    #[test]
    fn custom_phrases() {
        let t = Tokenizer::with_phrases(&["Fees, Fines".to_string()]).unwrap();
        assert_eq!(
            t.tokenize(Some("Fees, Fines, Degrees, Majors")),
            elements(&["Fees, Fines", "Degrees", "Majors"])
        );
        assert_eq!(
            Tokenizer::with_phrases(&[" ".to_string()]),
            Err(CardSortErrors::EmptyProtectedPhrase)
        );
    }

    #[test]
    fn tokenize_is_idempotent() {
        let t = Tokenizer::default();
        let inputs = [
            "a, b ,c",
            "Degrees, Majors, Minors, and Certificates Declared,x,,y",
            " Register, Add, or Drop Classes ",
            "single",
        ];
        for input in inputs {
            let first = t.tokenize(Some(input));
            let joined = first
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            assert_eq!(t.tokenize(Some(joined.as_str())), first, "input: {}", input);
        }
    }
}
