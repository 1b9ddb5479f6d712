use crate::extract::TextExtractor;
use crate::notify::{Notifier, Progress, Question, Stage};
use crate::result::IndexerResult;
use idsplit_core::{ExtractType, IdentifierSplitResult, IdsplitError, SourceFile};
use idsplit_dict::{TokenDictionary, WordDictionary};
use idsplit_split::{
    LevenshteinCorrector, Phase, Splitter, SplitterBuilder, SplitterKind, Stemmer, TextCorrector,
};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

/// Builder for an [`Indexer`].
///
/// Words, a splitter kind and at least one extractor are required.
#[derive(Default)]
pub struct IndexerBuilder {
    words: Option<Arc<WordDictionary>>,
    splitter: Option<SplitterKind>,
    extractors: Vec<Box<dyn TextExtractor>>,
    corrector: Option<Arc<dyn TextCorrector>>,
    stemmer: Option<Arc<dyn Stemmer>>,
    extract_type: ExtractType,
    files: Vec<SourceFile>,
    notifier: Option<Box<dyn Notifier>>,
}

impl IndexerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(mut self, words: Arc<WordDictionary>) -> Self {
        self.words = Some(words);
        self
    }

    pub fn splitter(mut self, kind: SplitterKind) -> Self {
        self.splitter = Some(kind);
        self
    }

    pub fn extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn extractors(mut self, extractors: impl IntoIterator<Item = Box<dyn TextExtractor>>) -> Self {
        self.extractors.extend(extractors);
        self
    }

    pub fn corrector(mut self, corrector: Arc<dyn TextCorrector>) -> Self {
        self.corrector = Some(corrector);
        self
    }

    /// Correct misspellings against words already identified in the project.
    pub fn spell_check(self) -> Self {
        let corrector = LevenshteinCorrector::new()
            .use_dictionary(false)
            .use_project_terms(true);
        self.corrector(Arc::new(corrector))
    }

    pub fn stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stemmer = Some(stemmer);
        self
    }

    pub fn extract_type(mut self, extract_type: ExtractType) -> Self {
        self.extract_type = extract_type;
        self
    }

    /// Files are processed in the order given.
    pub fn files(mut self, files: impl IntoIterator<Item = SourceFile>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<Indexer, IdsplitError> {
        let words = self
            .words
            .ok_or_else(|| IdsplitError::Config("no word dictionary supplied".into()))?;
        let kind = self
            .splitter
            .ok_or_else(|| IdsplitError::Config("no splitter supplied".into()))?;
        if self.extractors.is_empty() {
            return Err(IdsplitError::Config("no text extractors supplied".into()));
        }

        let mut by_extension = HashMap::new();
        for (slot, extractor) in self.extractors.iter().enumerate() {
            for ext in extractor.extensions() {
                let ext = ext.trim_start_matches('.').to_lowercase();
                if by_extension.insert(ext.clone(), slot).is_some() {
                    return Err(IdsplitError::DuplicateExtractor(ext));
                }
            }
        }

        let mut splitter = SplitterBuilder::new(kind);
        if let Some(corrector) = &self.corrector {
            splitter = splitter.corrector(Arc::clone(corrector));
        }
        if let Some(stemmer) = &self.stemmer {
            splitter = splitter.stemmer(Arc::clone(stemmer));
        }

        Ok(Indexer {
            tokens: TokenDictionary::new(words),
            splitter: splitter.build(),
            extractors: self.extractors,
            by_extension,
            stemmer: self.stemmer,
            extract_type: self.extract_type,
            files: self.files.into_iter().map(Arc::new).collect(),
            notifier: self.notifier,
        })
    }
}

/// Two-pass project indexer. The build pass learns project tokens from
/// every file, the result pass splits every identifier against what was
/// learned.
pub struct Indexer {
    tokens: TokenDictionary,
    splitter: Box<dyn Splitter>,
    extractors: Vec<Box<dyn TextExtractor>>,
    by_extension: HashMap<String, usize>,
    stemmer: Option<Arc<dyn Stemmer>>,
    extract_type: ExtractType,
    files: Vec<Arc<SourceFile>>,
    notifier: Option<Box<dyn Notifier>>,
}

/// The outcome of a completed run.
#[derive(Debug)]
pub struct Indexed {
    pub result: IndexerResult,
    /// Project vocabulary learned along the way.
    pub tokens: TokenDictionary,
}

impl Indexer {
    pub fn builder() -> IndexerBuilder {
        IndexerBuilder::new()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn run(self) -> Result<Indexed, IdsplitError> {
        let Self {
            mut tokens,
            mut splitter,
            extractors,
            by_extension,
            stemmer,
            extract_type,
            files,
            notifier,
        } = self;
        let progress = Progress::new(notifier.as_deref(), stemmer.is_some());
        let sources = Sources {
            files: &files,
            extractors: &extractors,
            by_extension: &by_extension,
            progress: &progress,
        };

        tracing::info!(
            files = files.len(),
            splitter = splitter.display_name(),
            "build pass started"
        );
        // Learn from every file before splitting any, so a token seen late in
        // the project still splits identifiers in the first file.
        sources.each(Stage::AnalyzingFile, Stage::IdentifyingToken, |_, extractor, text| {
            for identifier in extractor.extract_all(text) {
                splitter.update_token_dictionary(&mut tokens, &identifier);
            }
        })?;
        let stats = tokens.stats();
        tracing::info!(
            tokens = stats.tokens,
            merged = stats.merged_tokens,
            stems = stats.stems,
            "build pass finished"
        );

        let mut result = IndexerResult::new();
        sources.each(Stage::ReadingFileForIdentifiers, Stage::Splitting, |file, extractor, text| {
            for identifier in extractor.extract(text, extract_type) {
                let splits = splitter.split(&mut tokens, &identifier, Phase::Result);
                let mut split_result = IdentifierSplitResult::new(identifier, Arc::clone(file));
                split_result.add_all(splits);
                result.add_split_result(split_result);
            }
        })?;
        tracing::info!(
            identifiers = result.split_results().len(),
            "result pass finished"
        );

        // Merged tokens first: their primaries may themselves be misspelled
        // or stemmed entries resolved below.
        result.resolve_merged_tokens(&tokens);
        result.resolve_misspellings(&tokens);
        result.resolve_stems(&tokens);

        // Runs after resolution, which can add new dictionary words.
        if let Some(stemmer) = &stemmer {
            stem_identified(&mut result, &**stemmer, tokens.words(), &progress);
        }

        // Last, so stems and corrections that land on stop words are dropped too.
        result.remove_stop_words(tokens.words());
        progress.status(Stage::Completed, 1, 1, "Indexing completed");
        tracing::info!(
            words = result.dictionary_words().len(),
            tokens = result.tokens().len(),
            unidentified = result.unidentified().len(),
            "indexing completed"
        );

        Ok(Indexed { result, tokens })
    }
}

/// Replace dictionary words with their stems where the stem is a word too.
fn stem_identified(
    result: &mut IndexerResult,
    stemmer: &dyn Stemmer,
    words: &WordDictionary,
    progress: &Progress<'_>,
) {
    let identified: Vec<String> = result.dictionary_words().keys().cloned().collect();
    let total = identified.len();
    for (done, word) in identified.iter().enumerate() {
        progress.status(Stage::Stemming, done, total, word);
        let Some(stem) = stemmer.stem(word) else {
            continue;
        };
        if stem != *word && words.is_word(&stem) {
            tracing::trace!(word = %word, stem = %stem, "identified word stemmed");
            result.add_stemmed_word_and_replace_identified(word, &stem);
        }
    }
}

/// The file list with its extractors, walked once per pass.
struct Sources<'a> {
    files: &'a [Arc<SourceFile>],
    extractors: &'a [Box<dyn TextExtractor>],
    by_extension: &'a HashMap<String, usize>,
    progress: &'a Progress<'a>,
}

impl Sources<'_> {
    /// Hand every readable file to `visit`. Missing extractors and read
    /// failures are put to the notifier; a declined skip aborts the pass.
    fn each(
        &self,
        reading: Stage,
        working: Stage,
        mut visit: impl FnMut(&Arc<SourceFile>, &dyn TextExtractor, &str),
    ) -> Result<(), IdsplitError> {
        let total = self.files.len();
        for (done, file) in self.files.iter().enumerate() {
            self.progress.status(reading, done, total, &file.name);
            match self.load(file) {
                Ok(Some((extractor, text))) => {
                    tracing::debug!(file = %file.name, stage = %working, "processing");
                    visit(file, extractor, &text);
                    self.progress.status(working, done + 1, total, &file.name);
                }
                Ok(None) => tracing::debug!(file = %file.name, "no extractor, skipped"),
                // A declined NoExtractor skip arrives here as an error too, and
                // gets a second chance as a read failure before the pass aborts.
                Err(err) => {
                    if !self.progress.ask(Question::FileReadError, &err.to_string()) {
                        return Err(err);
                    }
                    tracing::warn!(file = %file.name, error = %err, "file skipped");
                }
            }
        }
        Ok(())
    }

    /// The file's extractor and text, or `None` when the caller chose to
    /// skip a file no extractor handles.
    fn load(&self, file: &SourceFile) -> Result<Option<(&dyn TextExtractor, String)>, IdsplitError> {
        let Some(&slot) = self.by_extension.get(&file.extension) else {
            let message = format!("no text extractor for '{}' ({})", file.extension, file.name);
            if self.progress.ask(Question::NoExtractor, &message) {
                return Ok(None);
            }
            return Err(IdsplitError::NoExtractor {
                extension: file.extension.clone(),
                path: file.name.clone(),
            });
        };

        let bytes = fs::read(&file.path).map_err(|err| IdsplitError::FileRead {
            path: file.name.clone(),
            message: err.to_string(),
        })?;
        // Source files in legacy encodings still yield their ASCII identifiers.
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Some((self.extractors[slot].as_ref(), text)))
    }
}
