use crate::camel::{camel_case_split, is_all_caps};
use crate::counter::CandidateCounter;
use crate::engine::{Segmenter, Services, segment};
use idsplit_core::limits::{MIN_MISSPELLED_STEMMED_LENGTH, MIN_TOKEN_LENGTH, TOKEN_COUNT};
use idsplit_core::{SplitIdentification, SplitWithIdentification, can_be_token};
use idsplit_dict::TokenDictionary;
use std::collections::VecDeque;

/// What to do with an unrecognized fragment long enough to be a token.
enum Outcome {
    /// Keep the fragment, possibly with a new classification.
    Settled(SplitIdentification),
    /// Replace the fragment with these pieces, already final.
    Replace(Vec<SplitWithIdentification>),
    /// Replace the fragment with these pieces and examine each of them.
    Expand(Vec<SplitWithIdentification>),
    /// Count it as a possible token.
    Candidate,
}

/// Build-phase learning. Candidate tokens and merged tokens are counted
/// across identifiers and promoted once they reach [`TOKEN_COUNT`].
pub(crate) struct Learner {
    tokens: CandidateCounter<()>,
    merged: CandidateCounter<SplitWithIdentification>,
}

impl Default for Learner {
    fn default() -> Self {
        Self {
            tokens: CandidateCounter::new(TOKEN_COUNT),
            merged: CandidateCounter::new(TOKEN_COUNT),
        }
    }
}

impl Learner {
    pub(crate) fn learn<S: Segmenter>(
        &mut self,
        segmenter: &S,
        services: &Services,
        tokens: &mut TokenDictionary,
        identifier: &str,
    ) {
        let camel = camel_case_split(tokens, identifier);
        if camel.len() >= MIN_TOKEN_LENGTH {
            let abbreviation: String = camel.iter().filter_map(|s| s.text.chars().next()).collect();
            tokens.add_abbreviation(&abbreviation, identifier);
        }

        let seeds = if S::SEEDS_FROM_CAMEL_CASE {
            camel
        } else {
            vec![SplitWithIdentification::new(
                identifier,
                SplitIdentification::Unidentified,
            )]
        };

        let mut done: Vec<SplitWithIdentification> = Vec::with_capacity(seeds.len());
        let mut pending: VecDeque<SplitWithIdentification> = seeds.into();

        while let Some(mut fragment) = pending.pop_front() {
            if fragment.identification.is_identified() {
                tokens.add_identified_in_project(&fragment.lowercase());
                done.push(fragment);
                continue;
            }
            if fragment.identification.is_recognized() {
                done.push(fragment);
                continue;
            }

            if can_be_token(&fragment.text) {
                match assess(segmenter, services, tokens, &fragment) {
                    Outcome::Settled(identification) => {
                        fragment.identification = identification;
                        done.push(fragment);
                        continue;
                    }
                    Outcome::Replace(pieces) => {
                        done.extend(pieces);
                        continue;
                    }
                    Outcome::Expand(pieces) => {
                        for piece in pieces.into_iter().rev() {
                            pending.push_front(piece);
                        }
                        continue;
                    }
                    Outcome::Candidate => self.tokens.add(fragment.lowercase()),
                }
            }

            self.record_merges(&fragment, done.last(), pending.front());
            done.push(fragment);
        }

        self.promote(segmenter, tokens);
    }

    /// Count compounds of `current` with a recognized neighbour, or plain
    /// concatenations with an unidentified one.
    fn record_merges(
        &mut self,
        current: &SplitWithIdentification,
        prev: Option<&SplitWithIdentification>,
        next: Option<&SplitWithIdentification>,
    ) {
        let is_token = |s: &SplitWithIdentification| s.identification == SplitIdentification::Token;
        let is_unidentified =
            |s: &&SplitWithIdentification| s.identification == SplitIdentification::Unidentified;
        let current_lower = current.lowercase();
        let mut merged = false;

        if let Some(next) = next {
            if next.identification.is_token_or_identified() && !prev.is_some_and(is_token) {
                let primary = next.lowercase();
                let text = format!("{current_lower}{primary}");
                if can_be_token(&text) {
                    self.merged
                        .add_with(text, SplitWithIdentification::new(primary, next.identification));
                    merged = true;
                }
            }
        }

        if let Some(prev) = prev {
            if prev.identification.is_token_or_identified() && !next.is_some_and(is_token) {
                let primary = prev.lowercase();
                let text = format!("{primary}{current_lower}");
                if can_be_token(&text) {
                    self.merged
                        .add_with(text, SplitWithIdentification::new(primary, prev.identification));
                    merged = true;
                }
            }
        }

        if merged {
            return;
        }
        if let Some(next) = next.filter(is_unidentified) {
            self.tokens.add(current_lower + &next.lowercase());
        } else if let Some(prev) = prev.filter(is_unidentified) {
            self.tokens.add(prev.lowercase() + &current_lower);
        }
    }

    /// Move candidates seen often enough into the token dictionary.
    fn promote<S: Segmenter>(&mut self, segmenter: &S, tokens: &mut TokenDictionary) {
        for (candidate, ()) in self.tokens.drain_ready() {
            let pieces = segment(segmenter, tokens, &candidate);
            if pieces.iter().all(|p| p.identification.is_recognized()) {
                continue;
            }
            if let [first, second] = pieces.as_slice() {
                if second.identification.is_recognized_unmerged() {
                    tokens.add_merged_token(&candidate, second.clone());
                } else if first.identification.is_recognized_unmerged() {
                    tokens.add_merged_token(&candidate, first.clone());
                }
            } else {
                tracing::debug!(token = %candidate, "token promoted");
                tokens.add_token(&candidate);
            }
        }

        for (text, primary) in self.merged.drain_ready() {
            tracing::debug!(merged = %text, primary = %primary.text, "merged token promoted");
            tokens.add_merged_token(&text, primary);
        }
    }
}

/// Decide what an unrecognized fragment of token length is.
fn assess<S: Segmenter>(
    segmenter: &S,
    services: &Services,
    tokens: &mut TokenDictionary,
    fragment: &SplitWithIdentification,
) -> Outcome {
    let lower = fragment.lowercase();
    let inner = segment(segmenter, tokens, &lower);
    let all_recognized = inner.iter().all(|s| s.identification.is_recognized());

    if is_all_caps(&fragment.text) {
        // Upper-case constants made of known words are split; anything
        // else in capitals is a token as it stands.
        if all_recognized {
            for piece in inner.iter().filter(|s| s.identification.is_identified()) {
                tokens.add_identified_in_project(&piece.text);
            }
            return Outcome::Replace(inner);
        }
        tokens.add_token(&lower);
        return Outcome::Settled(fragment.identification);
    }

    if tokens.is_acronym_like(&lower) {
        tokens.add_token(&lower);
        return Outcome::Settled(fragment.identification);
    }

    if all_recognized {
        let mut identified = inner.iter().filter(|s| s.identification.is_identified()).peekable();
        if identified.peek().is_none() || identified.any(|s| can_be_token(&s.text)) {
            return Outcome::Settled(fragment.identification);
        }
    }

    let long_enough = lower.chars().count() >= MIN_MISSPELLED_STEMMED_LENGTH;

    if let Some(stemmer) = services.stemmer.as_ref().filter(|_| long_enough) {
        if let Some(stem) = stemmer.stem(&lower) {
            let identification = tokens.classify(&stem);
            if identification.is_recognized() {
                if identification.is_identified() {
                    tokens.add_stemmed_word(&lower, &stem);
                    return Outcome::Settled(SplitIdentification::WordStemmed);
                }
                tokens.add_stemmed_token(&lower, &stem);
                return Outcome::Settled(SplitIdentification::TokenStemmed);
            }
        }
    }

    if let Some(corrector) = services.corrector.as_ref().filter(|_| long_enough) {
        let correction = corrector
            .correct(&lower, tokens)
            .filter(|c| !lower.starts_with(c.as_str()) && !lower.ends_with(c.as_str()));
        if let Some(correction) = correction {
            let identification = tokens.classify(&correction);
            if !identification.is_recognized() {
                return Outcome::Settled(fragment.identification);
            }
            if identification.is_identified() {
                tokens.add_misspelled_word(&lower, &correction);
                return Outcome::Settled(SplitIdentification::WordMisspelled);
            }
            tokens.add_misspelled_token(&lower, &correction);
            return Outcome::Settled(SplitIdentification::TokenMisspelled);
        }
    }

    if inner
        .iter()
        .any(|s| s.identification.is_recognized() && can_be_token(&s.text))
    {
        return Outcome::Expand(inner);
    }

    Outcome::Candidate
}
