use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a split fragment was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitIdentification {
    Unidentified,
    Token,
    Identified,
    SingleLetterIdentifier,
    MergedToken,
    TokenMisspelled,
    WordMisspelled,
    TokenStemmed,
    WordStemmed,
}

impl SplitIdentification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unidentified => "Unidentified",
            Self::Token => "Token",
            Self::Identified => "Identified",
            Self::SingleLetterIdentifier => "Single Letter Identifier",
            Self::MergedToken => "Merged Token",
            Self::TokenMisspelled => "Token Misspelled",
            Self::WordMisspelled => "Word Misspelled",
            Self::TokenStemmed | Self::WordStemmed => "Stemmed",
        }
    }

    /// A natural-language dictionary word.
    pub fn is_identified(self) -> bool {
        self == Self::Identified
    }

    /// Anything the dictionaries recognized. Single letters do not count.
    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unidentified | Self::SingleLetterIdentifier)
    }

    pub fn is_recognized_unmerged(self) -> bool {
        self.is_recognized() && self != Self::MergedToken
    }

    pub fn is_token_or_identified(self) -> bool {
        matches!(self, Self::Token | Self::Identified)
    }
}

impl fmt::Display for SplitIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fragment of a split identifier together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitWithIdentification {
    pub text: String,
    pub identification: SplitIdentification,
}

impl SplitWithIdentification {
    pub fn new(text: impl Into<String>, identification: SplitIdentification) -> Self {
        Self {
            text: text.into(),
            identification,
        }
    }

    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A dictionary entry ending at `end` (inclusive char offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPosition {
    pub end: usize,
    pub identification: SplitIdentification,
}

impl SplitPosition {
    pub fn new(end: usize, identification: SplitIdentification) -> Self {
        Self {
            end,
            identification,
        }
    }
}

/// A source file taking part in indexing. Identity is the path.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// Location used to read the file.
    pub path: PathBuf,
    /// Display name, usually the path relative to the scanned root.
    pub name: String,
    /// Lower-cased extension without the dot; empty when absent.
    pub extension: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            name: name.into(),
            extension,
        }
    }

    /// A file whose display name is its path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.to_string_lossy().into_owned();
        Self::new(path, name)
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for SourceFile {}

impl Hash for SourceFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// The ordered splits produced for one identifier occurrence in one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierSplitResult {
    pub identifier: String,
    pub file: Arc<SourceFile>,
    splits: Vec<SplitWithIdentification>,
}

impl IdentifierSplitResult {
    pub fn new(identifier: impl Into<String>, file: Arc<SourceFile>) -> Self {
        Self {
            identifier: identifier.into(),
            file,
            splits: Vec::new(),
        }
    }

    pub fn add(&mut self, split: SplitWithIdentification) {
        self.splits.push(split);
    }

    pub fn add_all(&mut self, splits: impl IntoIterator<Item = SplitWithIdentification>) {
        self.splits.extend(splits);
    }

    pub fn splits(&self) -> &[SplitWithIdentification] {
        &self.splits
    }
}

/// Which parts of a source file a text extractor should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExtractType(u8);

impl ExtractType {
    pub const COMMENTS: Self = Self(0b01);
    pub const IDENTIFIERS_AND_STRING_LITERALS: Self = Self(0b10);
    pub const ALL: Self = Self(0b11);

    /// Whether `part` was requested. An empty set requests everything.
    pub fn wants(self, part: Self) -> bool {
        self.0 == 0 || self.0 & part.0 == part.0
    }
}

impl Default for ExtractType {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for ExtractType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
