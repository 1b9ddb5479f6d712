use crate::distance::bounded_distance;
use idsplit_core::limits::MAX_CORRECTION_DISTANCE;
use idsplit_dict::TokenDictionary;

/// Maps a possibly misspelled fragment to a known term.
pub trait TextCorrector: Send + Sync {
    /// The closest known term to `text`, or `None` when nothing is close
    /// enough. An exact match returns the term itself.
    fn correct(&self, text: &str, tokens: &TokenDictionary) -> Option<String>;
}

/// Nearest-neighbour correction by edit distance.
///
/// Scans the natural-language word list and the project's identified terms
/// and keeps the first candidate with the smallest distance.
#[derive(Debug, Clone)]
pub struct LevenshteinCorrector {
    max_distance: usize,
    use_dictionary: bool,
    use_project_terms: bool,
}

impl Default for LevenshteinCorrector {
    fn default() -> Self {
        Self {
            max_distance: MAX_CORRECTION_DISTANCE,
            use_dictionary: true,
            use_project_terms: true,
        }
    }
}

impl LevenshteinCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Consider words from the natural-language dictionary.
    pub fn use_dictionary(mut self, yes: bool) -> Self {
        self.use_dictionary = yes;
        self
    }

    /// Consider words and tokens identified in the project so far.
    pub fn use_project_terms(mut self, yes: bool) -> Self {
        self.use_project_terms = yes;
        self
    }

    fn best_in<'a>(
        &self,
        text: &str,
        candidates: impl Iterator<Item = &'a String>,
        best: &mut Option<(usize, &'a String)>,
    ) {
        let len = text.chars().count();
        let min_len = len.saturating_sub(self.max_distance).max(1);
        let max_len = len + self.max_distance;

        for candidate in candidates {
            let candidate_len = candidate.chars().count();
            if candidate_len < min_len || candidate_len > max_len {
                continue;
            }
            let limit = match best {
                // Only a strictly smaller distance can replace the current best.
                Some((d, _)) if *d == 0 => return,
                Some((d, _)) => *d - 1,
                None => self.max_distance,
            };
            if let Some(d) = bounded_distance(text, candidate, limit) {
                *best = Some((d, candidate));
            }
        }
    }
}

impl TextCorrector for LevenshteinCorrector {
    fn correct(&self, text: &str, tokens: &TokenDictionary) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        let text = text.to_lowercase();
        let mut best = None;
        if self.use_dictionary {
            self.best_in(&text, tokens.words().word_list().iter(), &mut best);
        }
        if self.use_project_terms {
            self.best_in(
                &text,
                tokens.project_identifieds_and_tokens().iter(),
                &mut best,
            );
        }
        best.map(|(_, word)| word.clone())
    }
}
