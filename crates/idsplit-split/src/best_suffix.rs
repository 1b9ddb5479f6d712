use crate::SplitterKind;
use crate::camel::{CamelCase, is_all_caps};
use crate::engine::{Segmenter, segment};
use idsplit_core::limits::MIN_TOKEN_LENGTH_FOR_CAPS;
use idsplit_core::{SplitIdentification, SplitWithIdentification};
use idsplit_dict::TokenDictionary;
use std::cmp::Reverse;

/// Camel-case first, then a dynamic-programming search over every
/// segmentation of each piece the camel-case pass could not recognize.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestSuffix;

impl Segmenter for BestSuffix {
    const NAME: &'static str = "Best-Suffix";
    const KIND: SplitterKind = SplitterKind::BestSuffix;
    const SEEDS_FROM_CAMEL_CASE: bool = true;

    fn apply(&self, tokens: &TokenDictionary, identifier: &str) -> Vec<SplitWithIdentification> {
        let mut splits = Vec::new();

        for piece in segment(&CamelCase, tokens, identifier) {
            if piece.identification.is_recognized() {
                splits.push(SplitWithIdentification::new(
                    piece.lowercase(),
                    piece.identification,
                ));
            } else if is_all_caps(&piece.text) && piece.len() >= MIN_TOKEN_LENGTH_FOR_CAPS {
                // Lower-cased so the camel-case pass no longer keeps it whole.
                let caps = self.apply(tokens, &piece.lowercase());
                if caps.iter().all(|s| s.identification.is_recognized()) {
                    splits.extend(caps);
                } else {
                    splits.push(piece);
                }
            } else {
                splits.extend(best_suffix_split(tokens, &piece.text));
            }
        }

        splits
    }
}

/// Aggregate score of a segmentation suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SplitScore {
    word_letters: usize,
    token_letters: usize,
    segments: usize,
    recognized: usize,
}

impl SplitScore {
    fn segment(identification: SplitIdentification, len: usize) -> Self {
        let mut score = Self {
            segments: 1,
            ..Self::default()
        };
        if identification.is_recognized() {
            score.recognized = 1;
            if identification.is_identified() {
                score.word_letters = len;
            } else {
                score.token_letters = len;
            }
        }
        score
    }

    fn then(self, rest: Self) -> Self {
        Self {
            word_letters: self.word_letters + rest.word_letters,
            token_letters: self.token_letters + rest.token_letters,
            segments: self.segments + rest.segments,
            recognized: self.recognized + rest.recognized,
        }
    }

    /// More recognized letters, then more word letters, then fewer
    /// segments, then more recognized segments.
    fn key(&self) -> (usize, usize, Reverse<usize>, usize) {
        (
            self.word_letters + self.token_letters,
            self.word_letters,
            Reverse(self.segments),
            self.recognized,
        )
    }

    /// A full tie counts as better, so a later candidate replaces an
    /// earlier one.
    fn is_better_than(&self, other: Option<&Self>) -> bool {
        other.is_none_or(|other| self.key() >= other.key())
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    /// Inclusive end of the first segment of the best suffix split.
    end: usize,
    identification: SplitIdentification,
    score: SplitScore,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            end: 0,
            identification: SplitIdentification::Unidentified,
            score: SplitScore::default(),
        }
    }
}

/// The best segmentation of `term` over every dictionary, by [`SplitScore`].
/// Pieces are lower-cased and cover the whole term.
pub(crate) fn best_suffix_split(tokens: &TokenDictionary, term: &str) -> Vec<SplitWithIdentification> {
    let chars: Vec<char> = term.to_lowercase().chars().collect();
    let n = chars.len();
    if n == 0 {
        return Vec::new();
    }

    // best[i] is the best split of chars[i..]; best[n] is the empty suffix.
    let mut best = vec![Cell::default(); n + 1];

    for start in (0..n).rev() {
        let possible = tokens.possible_end_indexes(&chars, start, n - 1);
        let mut chosen: Option<Cell> = None;

        for end in start..n {
            let identification = possible
                .iter()
                .find(|p| p.end == end)
                .map_or(SplitIdentification::Unidentified, |p| p.identification);
            let score = SplitScore::segment(identification, end - start + 1).then(best[end + 1].score);
            if score.is_better_than(chosen.as_ref().map(|c| &c.score)) {
                chosen = Some(Cell {
                    end,
                    identification,
                    score,
                });
            }
        }

        if let Some(cell) = chosen {
            best[start] = cell;
        }
    }

    let mut splits = Vec::new();
    let mut start = 0;
    while start < n {
        let cell = best[start];
        let text: String = chars[start..=cell.end].iter().collect();
        splits.push(SplitWithIdentification::new(text, cell.identification));
        start = cell.end + 1;
    }
    splits
}
