use crate::best_suffix::BestSuffix;
use crate::camel::CamelCase;
use crate::correct::TextCorrector;
use crate::learn::Learner;
use crate::stem::Stemmer;
use crate::{Phase, Splitter, SplitterKind};
use idsplit_core::limits::{MIN_MISSPELLED_STEMMED_LENGTH, MIN_TOKEN_LENGTH};
use idsplit_core::{SplitIdentification, SplitWithIdentification};
use idsplit_dict::TokenDictionary;
use std::sync::Arc;

/// The splitting strategy plugged into a [`SplitEngine`].
pub trait Segmenter: Send + Sync + Default {
    const NAME: &'static str;
    const KIND: SplitterKind;
    /// Learning starts from the camel-case pieces instead of the whole
    /// identifier.
    const SEEDS_FROM_CAMEL_CASE: bool;

    /// Split an identifier that has at least three letters and no escapes.
    fn apply(&self, tokens: &TokenDictionary, identifier: &str) -> Vec<SplitWithIdentification>;
}

/// Returns the lower-cased identifier as a single classified piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSplit;

impl Segmenter for NoSplit {
    const NAME: &'static str = "No Split";
    const KIND: SplitterKind = SplitterKind::None;
    const SEEDS_FROM_CAMEL_CASE: bool = false;

    fn apply(&self, tokens: &TokenDictionary, identifier: &str) -> Vec<SplitWithIdentification> {
        let lower = identifier.to_lowercase();
        let identification = tokens.classify(&lower);
        vec![SplitWithIdentification::new(lower, identification)]
    }
}

/// Optional collaborators shared by splitting and learning.
#[derive(Clone, Default)]
pub(crate) struct Services {
    pub corrector: Option<Arc<dyn TextCorrector>>,
    pub stemmer: Option<Arc<dyn Stemmer>>,
    /// Only a primary splitter runs spelling correction on its results.
    pub primary: bool,
}

/// A [`Splitter`] built from a segmenter plus the shared learning and
/// correction machinery.
pub struct SplitEngine<S> {
    segmenter: S,
    services: Services,
    learner: Learner,
}

pub type EmptySplitter = SplitEngine<NoSplit>;
pub type CamelCaseSplitter = SplitEngine<CamelCase>;
pub type BestSuffixSplitter = SplitEngine<BestSuffix>;

impl<S: Segmenter> SplitEngine<S> {
    pub(crate) fn new(services: Services) -> Self {
        Self {
            segmenter: S::default(),
            services,
            learner: Learner::default(),
        }
    }
}

impl<S: Segmenter> Splitter for SplitEngine<S> {
    fn display_name(&self) -> &'static str {
        S::NAME
    }

    fn kind(&self) -> SplitterKind {
        S::KIND
    }

    fn update_token_dictionary(&mut self, tokens: &mut TokenDictionary, identifier: &str) {
        self.learner
            .learn(&self.segmenter, &self.services, tokens, identifier);
    }

    fn split(
        &self,
        tokens: &mut TokenDictionary,
        identifier: &str,
        phase: Phase,
    ) -> Vec<SplitWithIdentification> {
        let cleaned = replace_escapes(identifier);
        let mut splits = segment(&self.segmenter, tokens, identifier);

        let Some(corrector) = &self.services.corrector else {
            return splits;
        };
        if !self.services.primary
            || phase != Phase::Result
            || cleaned.chars().count() < MIN_MISSPELLED_STEMMED_LENGTH
        {
            return splits;
        }

        if let Some(fix) = find_misspelled_run(&splits, &**corrector, tokens) {
            tracing::trace!(original = %fix.original, correction = %fix.correction, "misspelling corrected");
            if fix.identification.is_identified() {
                tokens.add_misspelled_word(&fix.original, &fix.correction);
            } else {
                tokens.add_misspelled_token(&fix.original, &fix.correction);
            }
            splits = fix.splits;
        }
        splits
    }
}

/// Split without spelling correction: the short-identifier rule, escape
/// cleanup, the segmenter itself, then merging of unidentified neighbours.
pub(crate) fn segment<S: Segmenter>(
    segmenter: &S,
    tokens: &TokenDictionary,
    identifier: &str,
) -> Vec<SplitWithIdentification> {
    let letters: String = identifier
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    if letters.len() < MIN_TOKEN_LENGTH {
        if letters.is_empty() {
            return Vec::new();
        }
        // Looked up by its letters, so `_id` reads as the word "id".
        let identification = if tokens.words().is_word(&letters) {
            SplitIdentification::Identified
        } else {
            SplitIdentification::SingleLetterIdentifier
        };
        return vec![SplitWithIdentification::new(letters, identification)];
    }

    let cleaned = replace_escapes(identifier);
    let splits = segmenter.apply(tokens, &cleaned);
    merge_unidentified(tokens, splits)
}

/// Replace literal `\n`, `\r`, `\t` escapes (one or two backslashes) with a
/// space so the escape letter does not stick to the next word.
pub(crate) fn replace_escapes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let is_escape = |c: Option<&char>| matches!(c, Some('n' | 'r' | 't'));

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            if is_escape(chars.get(i + 1)) {
                out.push(' ');
                i += 2;
                continue;
            }
            if chars.get(i + 1) == Some(&'\\') && is_escape(chars.get(i + 2)) {
                out.push(' ');
                i += 3;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Join each unidentified piece with a neighbour when the pair is a known
/// term. The right neighbour is tried first.
fn merge_unidentified(
    tokens: &TokenDictionary,
    mut splits: Vec<SplitWithIdentification>,
) -> Vec<SplitWithIdentification> {
    let mut i = 0;
    while i < splits.len() {
        if splits[i].identification != SplitIdentification::Unidentified {
            i += 1;
            continue;
        }

        if i + 1 < splits.len() {
            let text = splits[i].lowercase() + &splits[i + 1].lowercase();
            let identification = tokens.classify(&text);
            if identification.is_recognized() {
                splits[i] = SplitWithIdentification::new(text, identification);
                splits.remove(i + 1);
                i += 1;
                continue;
            }
        }

        if i > 0 {
            let text = splits[i - 1].lowercase() + &splits[i].lowercase();
            let identification = tokens.classify(&text);
            if identification.is_recognized() {
                splits[i - 1] = SplitWithIdentification::new(text, identification);
                splits.remove(i);
                continue;
            }
        }

        i += 1;
    }
    splits
}

pub(crate) struct MisspelledRun {
    pub splits: Vec<SplitWithIdentification>,
    /// The pieces that were replaced, joined as they appeared.
    pub original: String,
    pub correction: String,
    pub identification: SplitIdentification,
}

fn joined_lower(splits: &[SplitWithIdentification], left: usize, right: usize) -> String {
    splits[left..=right]
        .iter()
        .map(|s| s.text.as_str())
        .collect::<String>()
        .to_lowercase()
}

/// Look for a run of pieces around an unidentified piece that, joined,
/// corrects to a known term. The first hit is widened while a wider run
/// still corrects, then replaces the run with the correction.
pub(crate) fn find_misspelled_run(
    splits: &[SplitWithIdentification],
    corrector: &dyn TextCorrector,
    tokens: &TokenDictionary,
) -> Option<MisspelledRun> {
    let n = splits.len();
    let unidentified = (0..n).filter(|&i| splits[i].identification == SplitIdentification::Unidentified);

    for pos in unidentified {
        for start in (0..=pos).rev() {
            let text = joined_lower(splits, start, pos);
            if text.chars().count() < MIN_MISSPELLED_STEMMED_LENGTH {
                continue;
            }
            let Some(mut correction) = corrector.correct(&text, tokens) else {
                continue;
            };

            let (mut left, mut right) = (start, pos);
            loop {
                let current = joined_lower(splits, left, right);
                let has_left = left > 0;
                let has_right = right + 1 < n;

                if has_left && has_right {
                    if let Some(both) = corrector.correct(&joined_lower(splits, left - 1, right + 1), tokens) {
                        left -= 1;
                        right += 1;
                        correction = both;
                        continue;
                    }
                }
                if has_left {
                    let wider = corrector
                        .correct(&joined_lower(splits, left - 1, right), tokens)
                        .filter(|c| *c != current);
                    if let Some(wider) = wider {
                        left -= 1;
                        correction = wider;
                        continue;
                    }
                }
                if has_right {
                    let wider = corrector
                        .correct(&joined_lower(splits, left, right + 1), tokens)
                        .filter(|c| *c != current);
                    if let Some(wider) = wider {
                        right += 1;
                        correction = wider;
                        continue;
                    }
                }
                break;
            }

            let identification = tokens.classify(&correction);
            let original: String = splits[left..=right].iter().map(|s| s.text.as_str()).collect();
            let mut corrected = Vec::with_capacity(n - (right - left));
            corrected.extend_from_slice(&splits[..left]);
            corrected.push(SplitWithIdentification::new(correction.clone(), identification));
            corrected.extend_from_slice(&splits[right + 1..]);

            return Some(MisspelledRun {
                splits: corrected,
                original,
                correction,
                identification,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correct::LevenshteinCorrector;
    use idsplit_dict::WordDictionary;
    use SplitIdentification::*;

    fn tokens_with(words: &[&str]) -> TokenDictionary {
        let words = WordDictionary::builder()
            .words(words.iter().copied())
            .build()
            .unwrap();
        TokenDictionary::new(Arc::new(words))
    }

    fn split(text: &str, identification: SplitIdentification) -> SplitWithIdentification {
        SplitWithIdentification::new(text, identification)
    }

    // --- replace_escapes ---

    #[test]
    fn escapes_become_spaces() {
        assert_eq!(replace_escapes(r"line\nnext"), "line next");
        assert_eq!(replace_escapes(r"tab\\tnext"), "tab next");
        assert_eq!(replace_escapes(r"a\rb\tc"), "a b c");
    }

    #[test]
    fn other_backslashes_stay() {
        assert_eq!(replace_escapes(r"path\x"), r"path\x");
        assert_eq!(replace_escapes(r"\\\n"), r"\ ");
        assert_eq!(replace_escapes("trailing\\"), "trailing\\");
    }

    // --- segment ---

    #[test]
    fn short_identifier_keeps_letters_only() {
        let tokens = tokens_with(&["at"]);
        assert_eq!(segment(&NoSplit, &tokens, "_x1"), vec![split("x", SingleLetterIdentifier)]);
        assert_eq!(segment(&NoSplit, &tokens, "a_t"), vec![split("at", Identified)]);
        assert!(segment(&NoSplit, &tokens, "_1_").is_empty());
    }

    #[test]
    fn short_identifier_is_looked_up_by_its_letters() {
        let tokens = tokens_with(&["id"]);
        assert_eq!(segment(&NoSplit, &tokens, "_id"), vec![split("id", Identified)]);
        assert_eq!(segment(&NoSplit, &tokens, "id_"), vec![split("id", Identified)]);
        assert_eq!(segment(&NoSplit, &tokens, "_iq"), vec![split("iq", SingleLetterIdentifier)]);
    }

    #[test]
    fn no_split_lowercases_whole_identifier() {
        let tokens = tokens_with(&["username"]);
        assert_eq!(segment(&NoSplit, &tokens, "UserName"), vec![split("username", Identified)]);
    }

    #[test]
    fn escape_letters_do_not_join_words() {
        let tokens = tokens_with(&["name"]);
        let splits = segment(&CamelCase, &tokens, r"\nname");
        assert_eq!(splits, vec![split("name", Identified)]);
    }

    // --- merge_unidentified ---

    #[test]
    fn merges_with_right_neighbour_first() {
        let tokens = tokens_with(&["username", "namex"]);
        let merged = merge_unidentified(
            &tokens,
            vec![split("user", Unidentified), split("name", Unidentified), split("x", Unidentified)],
        );
        assert_eq!(merged, vec![split("username", Identified), split("x", Unidentified)]);
    }

    #[test]
    fn merges_with_left_neighbour() {
        let tokens = tokens_with(&["get", "getter"]);
        let merged = merge_unidentified(
            &tokens,
            vec![split("get", Identified), split("ter", Unidentified), split("zz", Unidentified)],
        );
        assert_eq!(merged, vec![split("getter", Identified), split("zz", Unidentified)]);
    }

    #[test]
    fn unmergeable_pieces_are_untouched() {
        let tokens = tokens_with(&["get"]);
        let input = vec![split("get", Identified), split("qq", Unidentified)];
        assert_eq!(merge_unidentified(&tokens, input.clone()), input);
    }

    // --- find_misspelled_run ---

    #[test]
    fn corrects_single_unidentified_piece() {
        let tokens = tokens_with(&["receive", "data"]);
        let corrector = LevenshteinCorrector::new();
        let splits = vec![split("recieve", Unidentified), split("data", Identified)];

        let fix = find_misspelled_run(&splits, &corrector, &tokens).unwrap();
        assert_eq!(fix.original, "recieve");
        assert_eq!(fix.correction, "receive");
        assert_eq!(fix.identification, Identified);
        assert_eq!(fix.splits, vec![split("receive", Identified), split("data", Identified)]);
    }

    #[test]
    fn widens_to_join_a_broken_word() {
        let tokens = tokens_with(&["manager", "get"]);
        let corrector = LevenshteinCorrector::new();
        let splits = vec![
            split("get", Identified),
            split("mana", Unidentified),
            split("gr", Unidentified),
        ];

        let fix = find_misspelled_run(&splits, &corrector, &tokens).unwrap();
        assert_eq!(fix.original, "managr");
        assert_eq!(fix.splits, vec![split("get", Identified), split("manager", Identified)]);
    }

    #[test]
    fn nothing_to_correct() {
        let tokens = tokens_with(&["get"]);
        let corrector = LevenshteinCorrector::new();
        let splits = vec![split("get", Identified), split("qqqqqqqq", Unidentified)];
        assert!(find_misspelled_run(&splits, &corrector, &tokens).is_none());
        assert!(find_misspelled_run(&[split("get", Identified)], &corrector, &tokens).is_none());
    }
}
