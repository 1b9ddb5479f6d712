use crate::SplitterKind;
use crate::engine::Segmenter;
use idsplit_core::limits::MIN_TOKEN_LENGTH_FOR_CAPS;
use idsplit_core::{SplitIdentification, SplitWithIdentification};
use idsplit_dict::TokenDictionary;

/// Splits on symbols and case transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCase;

impl Segmenter for CamelCase {
    const NAME: &'static str = "Camel-Case";
    const KIND: SplitterKind = SplitterKind::CamelCase;
    const SEEDS_FROM_CAMEL_CASE: bool = false;

    fn apply(&self, tokens: &TokenDictionary, identifier: &str) -> Vec<SplitWithIdentification> {
        camel_case_split(tokens, identifier)
    }
}

pub(crate) fn is_all_caps(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_uppercase())
}

/// Split `identifier` into letter runs, then at case transitions, and
/// classify each piece by its lower-cased text. Pieces keep their case.
///
/// A single letter is a `SingleLetterIdentifier`; an all-caps run is kept
/// whole.
pub(crate) fn camel_case_split(tokens: &TokenDictionary, identifier: &str) -> Vec<SplitWithIdentification> {
    let mut splits = Vec::new();

    for run in identifier
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|run| !run.is_empty())
    {
        if run.len() == 1 {
            splits.push(SplitWithIdentification::new(
                run,
                SplitIdentification::SingleLetterIdentifier,
            ));
            continue;
        }

        if is_all_caps(run) && run.len() >= MIN_TOKEN_LENGTH_FOR_CAPS {
            let identification = tokens.classify(&run.to_lowercase());
            splits.push(SplitWithIdentification::new(run, identification));
            continue;
        }

        for piece in split_transitions(run) {
            let identification = tokens.classify(&piece.to_lowercase());
            splits.push(SplitWithIdentification::new(piece, identification));
        }
    }

    splits
}

/// Break an ASCII letter run before every lower-to-upper transition, and
/// before the last capital of an upper-case prefix that starts a new word
/// ("HTMLParser" -> "HTML", "Parser"). A trailing plural `s` stays with its
/// acronym ("URLs").
fn split_transitions(run: &str) -> Vec<&str> {
    let bytes = run.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..bytes.len() {
        let prev = bytes[i - 1];
        let curr = bytes[i];

        let split_camel = prev.is_ascii_lowercase() && curr.is_ascii_uppercase();
        let split_acronym =
            prev.is_ascii_uppercase() && curr.is_ascii_uppercase() && starts_word_after(bytes, i + 1);

        if split_camel || split_acronym {
            parts.push(&run[start..i]);
            start = i;
        }
    }

    parts.push(&run[start..]);
    parts
}

/// Whether the bytes from `at` continue a lower-case word: a lower-case
/// letter other than `s`, or `s` followed by another lower-case letter.
fn starts_word_after(bytes: &[u8], at: usize) -> bool {
    match bytes.get(at) {
        Some(b's') => bytes.get(at + 1).is_some_and(u8::is_ascii_lowercase),
        Some(b) => b.is_ascii_lowercase(),
        None => false,
    }
}
