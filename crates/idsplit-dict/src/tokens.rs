use crate::trie::Trie;
use crate::words::WordDictionary;
use idsplit_core::{SplitIdentification, SplitPosition, SplitWithIdentification};
use std::collections::HashSet;
use std::sync::Arc;

/// A cached correction or stem, with the category it was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub text: String,
    pub is_token: bool,
}

/// Entry counts per category, for logging and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStats {
    pub tokens: usize,
    pub acronyms: usize,
    pub merged_tokens: usize,
    pub misspellings: usize,
    pub stems: usize,
    pub identified_in_project: usize,
}

/// Project vocabulary learned while indexing, layered over a shared
/// [`WordDictionary`]. All keys are lower-cased on insert and lookup.
#[derive(Debug, Clone)]
pub struct TokenDictionary {
    words: Arc<WordDictionary>,
    tokens: Trie,
    acronyms: Trie<Vec<String>>,
    merged_tokens: Trie<SplitWithIdentification>,
    misspelled_words: Trie<String>,
    misspelled_tokens: Trie<String>,
    stemmed_words: Trie<String>,
    stemmed_tokens: Trie<String>,
    identified: Vec<String>,
    identified_seen: HashSet<String>,
}

impl TokenDictionary {
    pub fn new(words: Arc<WordDictionary>) -> Self {
        Self {
            words,
            tokens: Trie::new(),
            acronyms: Trie::new(),
            merged_tokens: Trie::new(),
            misspelled_words: Trie::new(),
            misspelled_tokens: Trie::new(),
            stemmed_words: Trie::new(),
            stemmed_tokens: Trie::new(),
            identified: Vec::new(),
            identified_seen: HashSet::new(),
        }
    }

    pub fn words(&self) -> &WordDictionary {
        &self.words
    }

    pub fn shared_words(&self) -> Arc<WordDictionary> {
        Arc::clone(&self.words)
    }

    // --- Tokens ---

    pub fn add_token(&mut self, token: &str) {
        let token = token.to_lowercase();
        if !token.is_empty() {
            tracing::trace!(token = %token, "token learned");
            self.tokens.insert(&token);
        }
    }

    pub fn is_token(&self, term: &str) -> bool {
        self.tokens.contains(&term.to_lowercase())
    }

    /// True when some token begins with `prefix`.
    pub fn starts_token(&self, prefix: &str) -> bool {
        self.tokens.starts_with(&prefix.to_lowercase())
    }

    // --- Acronyms ---

    /// Record `abbreviation` (the initials of a camel-case split) as short
    /// for `full_identifier`.
    pub fn add_abbreviation(&mut self, abbreviation: &str, full_identifier: &str) {
        let abbreviation = abbreviation.to_lowercase();
        if abbreviation.is_empty() {
            return;
        }
        let node = self.acronyms.insert(&abbreviation);
        match node.value_mut() {
            Some(expansions) => {
                if !expansions.iter().any(|e| e == full_identifier) {
                    expansions.push(full_identifier.to_string());
                }
            }
            None => node.set_value(vec![full_identifier.to_string()]),
        }
    }

    /// True when `term` is a recorded abbreviation.
    pub fn forms_token(&self, term: &str) -> bool {
        self.acronyms.contains(&term.to_lowercase())
    }

    /// Identifiers an abbreviation was derived from.
    pub fn expansions(&self, abbreviation: &str) -> &[String] {
        self.acronyms
            .get(&abbreviation.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Starts a word or token, or is itself an abbreviation.
    pub fn is_acronym_like(&self, term: &str) -> bool {
        self.words.starts_word(term)
            || self.words.forms_word(term)
            || self.starts_token(term)
            || self.forms_token(term)
    }

    // --- Merged tokens ---

    /// Record that `text` is a compound whose meaningful part is `primary`.
    pub fn add_merged_token(&mut self, text: &str, primary: SplitWithIdentification) {
        let text = text.to_lowercase();
        if !text.is_empty() {
            tracing::trace!(merged = %text, primary = %primary.text, "merged token learned");
            self.merged_tokens.insert_value(&text, primary);
        }
    }

    pub fn is_merged_token(&self, term: &str) -> bool {
        self.merged_tokens.contains(&term.to_lowercase())
    }

    pub fn merged_token_identification(&self, term: &str) -> Option<&SplitWithIdentification> {
        self.merged_tokens.get(&term.to_lowercase())
    }

    // --- Misspellings ---

    pub fn add_misspelled_word(&mut self, text: &str, correction: &str) {
        self.misspelled_words
            .insert_value(&text.to_lowercase(), correction.to_string());
    }

    pub fn add_misspelled_token(&mut self, text: &str, correction: &str) {
        self.misspelled_tokens
            .insert_value(&text.to_lowercase(), correction.to_string());
    }

    pub fn is_misspelled_word(&self, term: &str) -> bool {
        self.misspelled_words.contains(&term.to_lowercase())
    }

    pub fn is_misspelled_token(&self, term: &str) -> bool {
        self.misspelled_tokens.contains(&term.to_lowercase())
    }

    /// Cached correction for `term`. Token corrections take precedence.
    pub fn correction_for_misspelled(&self, term: &str) -> Option<Replacement> {
        let term = term.to_lowercase();
        if let Some(text) = self.misspelled_tokens.get(&term) {
            return Some(Replacement {
                text: text.clone(),
                is_token: true,
            });
        }
        self.misspelled_words.get(&term).map(|text| Replacement {
            text: text.clone(),
            is_token: false,
        })
    }

    // --- Stems ---

    pub fn add_stemmed_word(&mut self, text: &str, stem: &str) {
        self.stemmed_words
            .insert_value(&text.to_lowercase(), stem.to_string());
    }

    pub fn add_stemmed_token(&mut self, text: &str, stem: &str) {
        self.stemmed_tokens
            .insert_value(&text.to_lowercase(), stem.to_string());
    }

    pub fn is_stemmed_word(&self, term: &str) -> bool {
        self.stemmed_words.contains(&term.to_lowercase())
    }

    pub fn is_stemmed_token(&self, term: &str) -> bool {
        self.stemmed_tokens.contains(&term.to_lowercase())
    }

    /// Cached stem for `term`. Word stems take precedence.
    pub fn stemmed_for_text(&self, term: &str) -> Option<Replacement> {
        let term = term.to_lowercase();
        if let Some(text) = self.stemmed_words.get(&term) {
            return Some(Replacement {
                text: text.clone(),
                is_token: false,
            });
        }
        self.stemmed_tokens.get(&term).map(|text| Replacement {
            text: text.clone(),
            is_token: true,
        })
    }

    // --- Identified in project ---

    pub fn add_identified_in_project(&mut self, word: &str) {
        if self.identified_seen.insert(word.to_string()) {
            self.identified.push(word.to_string());
        }
    }

    /// Words and tokens identified so far, in first-seen order.
    pub fn project_identifieds_and_tokens(&self) -> &[String] {
        &self.identified
    }

    // --- Lookups ---

    /// Every dictionary entry starting at `start`, by end offset.
    ///
    /// Word positions come first, then token positions. Misspellings,
    /// stems, acronyms and merged tokens follow in that order and only claim
    /// offsets nothing earlier has claimed.
    pub fn possible_end_indexes(&self, term: &[char], start: usize, end: usize) -> Vec<SplitPosition> {
        let mut positions = self.words.possible_end_indexes(term, start, end);
        positions.extend(
            self.tokens
                .split_positions(term, start, end, SplitIdentification::Token),
        );

        let later = [
            self.misspelled_words.split_positions(
                term,
                start,
                end,
                SplitIdentification::WordMisspelled,
            ),
            self.misspelled_tokens.split_positions(
                term,
                start,
                end,
                SplitIdentification::TokenMisspelled,
            ),
            self.stemmed_words
                .split_positions(term, start, end, SplitIdentification::WordStemmed),
            self.stemmed_tokens
                .split_positions(term, start, end, SplitIdentification::TokenStemmed),
            self.acronyms
                .split_positions(term, start, end, SplitIdentification::Token),
            self.merged_tokens
                .split_positions(term, start, end, SplitIdentification::MergedToken),
        ];
        for candidates in later {
            for candidate in candidates {
                if !positions.iter().any(|p| p.end == candidate.end) {
                    positions.push(candidate);
                }
            }
        }
        positions
    }

    /// Classify a whole term against every dictionary.
    pub fn classify(&self, term: &str) -> SplitIdentification {
        let term = term.to_lowercase();
        if self.words.is_word(&term) {
            SplitIdentification::Identified
        } else if self.tokens.contains(&term) {
            SplitIdentification::Token
        } else if self.merged_tokens.contains(&term) {
            SplitIdentification::MergedToken
        } else if self.misspelled_words.contains(&term) {
            SplitIdentification::WordMisspelled
        } else if self.misspelled_tokens.contains(&term) {
            SplitIdentification::TokenMisspelled
        } else if self.stemmed_words.contains(&term) {
            SplitIdentification::WordStemmed
        } else if self.stemmed_tokens.contains(&term) {
            SplitIdentification::TokenStemmed
        } else {
            SplitIdentification::Unidentified
        }
    }

    pub fn stats(&self) -> TokenStats {
        TokenStats {
            tokens: self.tokens.len(),
            acronyms: self.acronyms.len(),
            merged_tokens: self.merged_tokens.len(),
            misspellings: self.misspelled_words.len() + self.misspelled_tokens.len(),
            stems: self.stemmed_words.len() + self.stemmed_tokens.len(),
            identified_in_project: self.identified.len(),
        }
    }
}
