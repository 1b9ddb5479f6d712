use idsplit_core::{IdentifierSplitResult, SourceFile, SplitIdentification, SplitWithIdentification};
use idsplit_dict::{TokenDictionary, WordDictionary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type FileList = Vec<Arc<SourceFile>>;

/// A word that resolves to another (a correction or a stem) and the files
/// it was seen in. `word` stays `None` until the dictionary resolves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordWithFiles {
    pub word: Option<String>,
    pub files: FileList,
}

/// Vocabulary of an indexed project, bucketed by classification. Every key
/// is lower-cased and every file list is free of duplicates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexerResult {
    dictionary_words: BTreeMap<String, FileList>,
    tokens: BTreeMap<String, FileList>,
    unidentified: BTreeMap<String, FileList>,
    merged_tokens: BTreeMap<String, FileList>,
    stemmed: BTreeMap<String, WordWithFiles>,
    corrections: BTreeMap<String, WordWithFiles>,
    split_results: Vec<IdentifierSplitResult>,
}

fn add_file(files: &mut FileList, file: &Arc<SourceFile>) {
    if !files.contains(file) {
        files.push(Arc::clone(file));
    }
}

fn add_to(bucket: &mut BTreeMap<String, FileList>, key: String, file: &Arc<SourceFile>) {
    add_file(bucket.entry(key).or_default(), file);
}

fn add_pending(bucket: &mut BTreeMap<String, WordWithFiles>, key: String, file: &Arc<SourceFile>) {
    add_file(&mut bucket.entry(key).or_default().files, file);
}

impl IndexerResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Natural-language words, with stop words removed once indexing completes.
    pub fn dictionary_words(&self) -> &BTreeMap<String, FileList> {
        &self.dictionary_words
    }

    /// Learned tokens and single letters.
    pub fn tokens(&self) -> &BTreeMap<String, FileList> {
        &self.tokens
    }

    pub fn unidentified(&self) -> &BTreeMap<String, FileList> {
        &self.unidentified
    }

    /// Merged tokens not yet resolved. Empty after indexing completes.
    pub fn merged_tokens(&self) -> &BTreeMap<String, FileList> {
        &self.merged_tokens
    }

    pub fn stemmed(&self) -> &BTreeMap<String, WordWithFiles> {
        &self.stemmed
    }

    pub fn corrections(&self) -> &BTreeMap<String, WordWithFiles> {
        &self.corrections
    }

    pub fn split_results(&self) -> &[IdentifierSplitResult] {
        &self.split_results
    }

    pub fn add_split_result(&mut self, result: IdentifierSplitResult) {
        for split in result.splits() {
            self.add_identification(split, &result.file);
        }
        self.split_results.push(result);
    }

    fn add_identification(&mut self, split: &SplitWithIdentification, file: &Arc<SourceFile>) {
        let key = split.lowercase();
        match split.identification {
            SplitIdentification::Identified => add_to(&mut self.dictionary_words, key, file),
            SplitIdentification::Token | SplitIdentification::SingleLetterIdentifier => {
                add_to(&mut self.tokens, key, file)
            }
            SplitIdentification::Unidentified => add_to(&mut self.unidentified, key, file),
            SplitIdentification::MergedToken => add_to(&mut self.merged_tokens, key, file),
            SplitIdentification::WordMisspelled | SplitIdentification::TokenMisspelled => {
                add_pending(&mut self.corrections, key, file)
            }
            SplitIdentification::WordStemmed | SplitIdentification::TokenStemmed => {
                add_pending(&mut self.stemmed, key, file)
            }
        }
    }

    /// File every merged token under the classification of its primary split.
    pub fn resolve_merged_tokens(&mut self, tokens: &TokenDictionary) {
        let merged = std::mem::take(&mut self.merged_tokens);
        for (text, files) in merged {
            let split = tokens
                .merged_token_identification(&text)
                .cloned()
                .unwrap_or_else(|| SplitWithIdentification::new(text, SplitIdentification::Unidentified));
            for file in &files {
                self.add_identification(&split, file);
            }
        }
        self.merged_tokens.clear();
    }

    /// Record each misspelling's correction and credit the corrected word.
    pub fn resolve_misspellings(&mut self, tokens: &TokenDictionary) {
        let resolved = resolve(&mut self.corrections, |text| tokens.correction_for_misspelled(text));
        for (split, files) in resolved {
            for file in &files {
                self.add_identification(&split, file);
            }
        }
    }

    /// Record each stemmed word's stem and credit the stem.
    pub fn resolve_stems(&mut self, tokens: &TokenDictionary) {
        let resolved = resolve(&mut self.stemmed, |text| tokens.stemmed_for_text(text));
        for (split, files) in resolved {
            for file in &files {
                self.add_identification(&split, file);
            }
        }
    }

    /// Move a dictionary word's files to its stem and remember the stem.
    pub fn add_stemmed_word_and_replace_identified(&mut self, identified: &str, stem: &str) {
        let Some(files) = self.dictionary_words.remove(identified) else {
            return;
        };

        let target = self.dictionary_words.entry(stem.to_string()).or_default();
        for file in &files {
            add_file(target, file);
        }

        self.stemmed
            .entry(identified.to_string())
            .or_insert_with(|| WordWithFiles {
                word: Some(stem.to_string()),
                files,
            });
    }

    pub fn remove_stop_words(&mut self, words: &WordDictionary) {
        self.dictionary_words.retain(|word, _| !words.is_stop_word(word));
    }
}

/// Fill in `word` for every pending entry the lookup knows, returning the
/// resolved split and the files to credit it with.
fn resolve(
    pending: &mut BTreeMap<String, WordWithFiles>,
    lookup: impl Fn(&str) -> Option<idsplit_dict::Replacement>,
) -> Vec<(SplitWithIdentification, FileList)> {
    let mut resolved = Vec::new();
    for (text, entry) in pending.iter_mut() {
        let Some(replacement) = lookup(text) else {
            continue;
        };
        let identification = if replacement.is_token {
            SplitIdentification::Token
        } else {
            SplitIdentification::Identified
        };
        entry.word = Some(replacement.text.clone());
        resolved.push((
            SplitWithIdentification::new(replacement.text, identification),
            entry.files.clone(),
        ));
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use idsplit_dict::StopWords;
    use SplitIdentification::*;

    fn file(name: &str) -> Arc<SourceFile> {
        Arc::new(SourceFile::from_path(name))
    }

    fn result_for(file: &Arc<SourceFile>, splits: &[(&str, SplitIdentification)]) -> IdentifierSplitResult {
        let mut result = IdentifierSplitResult::new("ident", Arc::clone(file));
        result.add_all(
            splits
                .iter()
                .map(|(text, identification)| SplitWithIdentification::new(*text, *identification)),
        );
        result
    }

    fn tokens_with(words: &[&str]) -> TokenDictionary {
        let words = WordDictionary::builder()
            .words(words.iter().copied())
            .build()
            .unwrap();
        TokenDictionary::new(Arc::new(words))
    }

    fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    // --- add_split_result ---

    #[test]
    fn splits_land_in_their_buckets() {
        let a = file("a.java");
        let mut result = IndexerResult::new();
        result.add_split_result(result_for(
            &a,
            &[
                ("User", Identified),
                ("mgr", Token),
                ("i", SingleLetterIdentifier),
                ("zz", Unidentified),
                ("qzcount", MergedToken),
                ("recieve", WordMisspelled),
                ("running", WordStemmed),
            ],
        ));

        assert_eq!(keys(result.dictionary_words()), vec!["user"]);
        assert_eq!(keys(result.tokens()), vec!["i", "mgr"]);
        assert_eq!(keys(result.unidentified()), vec!["zz"]);
        assert_eq!(keys(result.merged_tokens()), vec!["qzcount"]);
        assert_eq!(keys(result.corrections()), vec!["recieve"]);
        assert_eq!(keys(result.stemmed()), vec!["running"]);
        assert_eq!(result.split_results().len(), 1);
    }

    #[test]
    fn files_are_not_duplicated() {
        let a = file("a.java");
        let b = file("b.java");
        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("user", Identified)]));
        result.add_split_result(result_for(&a, &[("User", Identified)]));
        result.add_split_result(result_for(&b, &[("user", Identified)]));

        assert_eq!(result.dictionary_words()["user"], vec![a, b]);
        assert_eq!(result.split_results().len(), 3);
    }

    // --- Resolution ---

    #[test]
    fn merged_tokens_resolve_to_primary_split() {
        let a = file("a.java");
        let mut tokens = tokens_with(&["count"]);
        tokens.add_merged_token("qzcount", SplitWithIdentification::new("count", Identified));

        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("qzcount", MergedToken)]));
        result.resolve_merged_tokens(&tokens);

        assert!(result.merged_tokens().is_empty());
        assert_eq!(result.dictionary_words()["count"], vec![a]);
    }

    #[test]
    fn misspellings_resolve_to_corrections() {
        let a = file("a.java");
        let mut tokens = tokens_with(&["receive"]);
        tokens.add_misspelled_word("recieve", "receive");

        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("recieve", WordMisspelled), ("zzq", TokenMisspelled)]));
        result.resolve_misspellings(&tokens);

        assert_eq!(result.corrections()["recieve"].word.as_deref(), Some("receive"));
        assert_eq!(result.corrections()["zzq"].word, None);
        assert_eq!(result.dictionary_words()["receive"], vec![a]);
    }

    #[test]
    fn stems_resolve_and_credit_the_stem() {
        let a = file("a.java");
        let mut tokens = tokens_with(&["run"]);
        tokens.add_stemmed_word("running", "run");
        tokens.add_stemmed_token("impls", "impl");

        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("running", WordStemmed), ("impls", TokenStemmed)]));
        result.resolve_stems(&tokens);

        assert_eq!(result.stemmed()["running"].word.as_deref(), Some("run"));
        assert_eq!(result.dictionary_words()["run"], vec![a.clone()]);
        assert_eq!(result.tokens()["impl"], vec![a]);
    }

    #[test]
    fn identified_word_moves_to_its_stem() {
        let a = file("a.java");
        let b = file("b.java");
        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("running", Identified), ("run", Identified)]));
        result.add_split_result(result_for(&b, &[("running", Identified)]));

        result.add_stemmed_word_and_replace_identified("running", "run");

        assert_eq!(keys(result.dictionary_words()), vec!["run"]);
        assert_eq!(result.dictionary_words()["run"], vec![a.clone(), b.clone()]);
        assert_eq!(
            result.stemmed()["running"],
            WordWithFiles {
                word: Some("run".into()),
                files: vec![a, b],
            }
        );
    }

    #[test]
    fn replacing_an_unknown_word_is_a_no_op() {
        let mut result = IndexerResult::new();
        result.add_stemmed_word_and_replace_identified("running", "run");
        assert!(result.dictionary_words().is_empty());
        assert!(result.stemmed().is_empty());
    }

    // --- Stop words ---

    #[test]
    fn stop_words_are_removed() {
        let words = WordDictionary::builder()
            .words(["the", "user"])
            .stop_words(StopWords {
                programming: false,
                english: true,
            })
            .build()
            .unwrap();
        let a = file("a.java");
        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("the", Identified), ("user", Identified)]));
        result.remove_stop_words(&words);

        assert_eq!(keys(result.dictionary_words()), vec!["user"]);
        assert!(result.dictionary_words().keys().all(|w| !words.is_stop_word(w)));
    }

    #[test]
    fn serializes_buckets() {
        let a = file("a.java");
        let mut result = IndexerResult::new();
        result.add_split_result(result_for(&a, &[("user", Identified)]));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["dictionary_words"]["user"].is_array());
    }
}
