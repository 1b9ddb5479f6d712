use crate::trie::Trie;
use crate::wordlist::{
    self, CPP_KEYWORDS, CSHARP_KEYWORDS, CustomDictionary, ENGLISH_STOP_WORDS, ENGLISH_WORDS,
    JAVA_KEYWORDS,
};
use idsplit_core::{IdsplitError, SplitIdentification, SplitPosition};
use std::fs;
use std::path::PathBuf;

/// Which stop-word categories to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopWords {
    /// Java, C++ and C# keywords.
    pub programming: bool,
    pub english: bool,
}

impl Default for StopWords {
    fn default() -> Self {
        Self {
            programming: true,
            english: true,
        }
    }
}

impl StopWords {
    pub fn none() -> Self {
        Self {
            programming: false,
            english: false,
        }
    }
}

/// Natural-language lexicon plus stop words. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    words: Trie,
    stop_words: Trie,
    word_list: Vec<String>,
}

impl WordDictionary {
    pub fn builder() -> WordDictionaryBuilder {
        WordDictionaryBuilder::default()
    }

    fn add_word(&mut self, word: &str) {
        let word = word.to_lowercase();
        if word.is_empty() || self.words.contains(&word) {
            return;
        }
        self.words.insert(&word);
        self.word_list.push(word);
    }

    fn add_stop_word(&mut self, word: &str) {
        let word = word.to_lowercase();
        if !word.is_empty() {
            self.stop_words.insert(&word);
        }
    }

    pub fn is_word(&self, term: &str) -> bool {
        self.words.contains(&term.to_lowercase())
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(&term.to_lowercase())
    }

    /// True when at least one word begins with `prefix`.
    pub fn starts_word(&self, prefix: &str) -> bool {
        self.words.starts_with(&prefix.to_lowercase())
    }

    /// Never true; kept for the acronym-likeness check.
    pub fn forms_word(&self, _term: &str) -> bool {
        false
    }

    /// End offsets of words starting at `start`, tagged `Identified`.
    pub fn possible_end_indexes(&self, term: &[char], start: usize, end: usize) -> Vec<SplitPosition> {
        self.words
            .split_positions(term, start, end, SplitIdentification::Identified)
    }

    /// All words in insertion order.
    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    pub fn len(&self) -> usize {
        self.word_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_list.is_empty()
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

/// Builder for [`WordDictionary`].
#[derive(Debug, Default)]
pub struct WordDictionaryBuilder {
    bundled: bool,
    words: Vec<String>,
    files: Vec<PathBuf>,
    stop_words: Option<StopWords>,
    custom: Option<CustomDictionary>,
}

impl WordDictionaryBuilder {
    /// Include the bundled English lexicon.
    pub fn bundled_english(mut self) -> Self {
        self.bundled = true;
        self
    }

    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Read an extra newline-delimited word list at build time.
    pub fn word_list_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Stop-word categories. Defaults to none.
    pub fn stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Merge the user's custom word list. A missing file contributes nothing.
    pub fn custom_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom = Some(CustomDictionary::new(path));
        self
    }

    pub fn build(self) -> Result<WordDictionary, IdsplitError> {
        let mut dict = WordDictionary::default();

        if self.bundled {
            for word in wordlist::parse_words(ENGLISH_WORDS) {
                dict.add_word(&word);
            }
        }
        for path in &self.files {
            let text = fs::read_to_string(path).map_err(|err| IdsplitError::FileRead {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
            for word in wordlist::parse_words(&text) {
                dict.add_word(&word);
            }
        }
        for word in &self.words {
            dict.add_word(word);
        }
        if let Some(custom) = &self.custom {
            for word in custom.load()? {
                dict.add_word(&word);
            }
        }

        let stop_words = self.stop_words.unwrap_or_else(StopWords::none);
        if stop_words.programming {
            for list in [JAVA_KEYWORDS, CPP_KEYWORDS, CSHARP_KEYWORDS] {
                for word in wordlist::parse_words(list) {
                    dict.add_stop_word(&word);
                }
            }
        }
        if stop_words.english {
            for word in wordlist::parse_words(ENGLISH_STOP_WORDS) {
                dict.add_stop_word(&word);
            }
        }

        tracing::debug!(
            words = dict.len(),
            stop_words = dict.stop_word_count(),
            "word dictionary built"
        );
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> WordDictionary {
        WordDictionary::builder()
            .words(words.iter().copied())
            .build()
            .unwrap()
    }

    // --- Queries ---

    #[test]
    fn is_word_is_case_insensitive() {
        let d = dict(&["User", "name"]);
        assert!(d.is_word("user"));
        assert!(d.is_word("USER"));
        assert!(d.is_word("Name"));
        assert!(!d.is_word("username"));
        assert!(!d.is_word(""));
    }

    #[test]
    fn starts_word_checks_prefixes() {
        let d = dict(&["implement"]);
        assert!(d.starts_word("impl"));
        assert!(d.starts_word("IMPL"));
        assert!(!d.starts_word("mgr"));
    }

    #[test]
    fn forms_word_is_always_false() {
        let d = dict(&["run"]);
        assert!(!d.forms_word("run"));
        assert!(!d.forms_word("r"));
    }

    #[test]
    fn word_list_keeps_insertion_order_without_duplicates() {
        let d = dict(&["beta", "alpha", "Beta"]);
        assert_eq!(d.word_list(), ["beta", "alpha"]);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn possible_end_indexes_tags_identified() {
        let d = dict(&["get", "getter"]);
        let term: Vec<char> = "getters".chars().collect();
        let ends: Vec<usize> = d
            .possible_end_indexes(&term, 0, term.len() - 1)
            .iter()
            .map(|p| p.end)
            .collect();
        assert_eq!(ends, vec![2, 5]);
        assert!(d
            .possible_end_indexes(&term, 0, 6)
            .iter()
            .all(|p| p.identification == SplitIdentification::Identified));
    }

    // --- Stop words ---

    #[test]
    fn no_stop_words_by_default() {
        let d = dict(&[]);
        assert!(!d.is_stop_word("the"));
        assert_eq!(d.stop_word_count(), 0);
    }

    #[test]
    fn english_stop_words_only() {
        let d = WordDictionary::builder()
            .stop_words(StopWords {
                programming: false,
                english: true,
            })
            .build()
            .unwrap();
        assert!(d.is_stop_word("the"));
        assert!(d.is_stop_word("The"));
        assert!(!d.is_stop_word("public"));
    }

    #[test]
    fn programming_stop_words_cover_all_languages() {
        let d = WordDictionary::builder()
            .stop_words(StopWords {
                programming: true,
                english: false,
            })
            .build()
            .unwrap();
        assert!(d.is_stop_word("implements"));
        assert!(d.is_stop_word("nullptr"));
        assert!(d.is_stop_word("foreach"));
        assert!(!d.is_stop_word("the"));
    }

    #[test]
    fn stop_words_are_not_words() {
        let d = WordDictionary::builder()
            .stop_words(StopWords::default())
            .build()
            .unwrap();
        assert!(d.is_stop_word("while"));
        assert!(!d.is_word("while"));
    }

    // --- Sources ---

    #[test]
    fn bundled_english_is_loaded() {
        let d = WordDictionary::builder().bundled_english().build().unwrap();
        assert!(d.is_word("user"));
        assert!(d.len() > 500);
    }

    #[test]
    fn word_list_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "Kernel\r\nsyscall\n").unwrap();

        let d = WordDictionary::builder()
            .word_list_file(&path)
            .build()
            .unwrap();
        assert!(d.is_word("kernel"));
        assert!(d.is_word("syscall"));
    }

    #[test]
    fn missing_word_list_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = WordDictionary::builder()
            .word_list_file(dir.path().join("absent.txt"))
            .build();
        assert!(matches!(result, Err(IdsplitError::FileRead { .. })));
    }

    #[test]
    fn custom_dictionary_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        CustomDictionary::new(&path)
            .save(&["kubectl".to_string()])
            .unwrap();

        let d = WordDictionary::builder()
            .custom_dictionary(&path)
            .build()
            .unwrap();
        assert!(d.is_word("kubectl"));
    }

    #[test]
    fn absent_custom_dictionary_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let d = WordDictionary::builder()
            .words(["one"])
            .custom_dictionary(dir.path().join("none.txt"))
            .build()
            .unwrap();
        assert_eq!(d.len(), 1);
    }
}
