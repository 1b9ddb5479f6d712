//! Identifier splitters: none, camel-case, and best-suffix, with build-phase
//! dictionary learning, stemming, and spelling correction.

mod best_suffix;
mod camel;
mod correct;
mod counter;
pub mod distance;
mod engine;
mod learn;
mod stem;

pub use best_suffix::BestSuffix;
pub use camel::CamelCase;
pub use correct::{LevenshteinCorrector, TextCorrector};
pub use engine::{
    BestSuffixSplitter, CamelCaseSplitter, EmptySplitter, NoSplit, Segmenter, SplitEngine,
};
pub use stem::{SnowballStemmer, Stemmer};

use engine::Services;
use idsplit_core::{IdsplitError, SplitWithIdentification};
use idsplit_dict::TokenDictionary;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which pass a split belongs to. Spelling correction only runs on results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Build,
    Result,
}

/// Splits identifiers against a token dictionary and learns new tokens.
pub trait Splitter: Send {
    fn display_name(&self) -> &'static str;

    fn kind(&self) -> SplitterKind;

    /// Learn from one identifier during the build phase.
    fn update_token_dictionary(&mut self, tokens: &mut TokenDictionary, identifier: &str);

    /// Split one identifier. In the result phase a primary splitter with a
    /// corrector also caches the misspellings it fixes.
    fn split(
        &self,
        tokens: &mut TokenDictionary,
        identifier: &str,
        phase: Phase,
    ) -> Vec<SplitWithIdentification>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitterKind {
    None,
    CamelCase,
    #[default]
    BestSuffix,
}

impl SplitterKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => NoSplit::NAME,
            Self::CamelCase => CamelCase::NAME,
            Self::BestSuffix => BestSuffix::NAME,
        }
    }
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SplitterKind {
    type Err = IdsplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "no-split" => Ok(Self::None),
            "camel-case" | "camelcase" | "camel" => Ok(Self::CamelCase),
            "best-suffix" | "bestsuffix" => Ok(Self::BestSuffix),
            other => Err(IdsplitError::Config(format!("unknown splitter '{other}'"))),
        }
    }
}

/// Builder for a boxed [`Splitter`].
pub struct SplitterBuilder {
    kind: SplitterKind,
    corrector: Option<Arc<dyn TextCorrector>>,
    stemmer: Option<Arc<dyn Stemmer>>,
    primary: bool,
}

impl SplitterBuilder {
    pub fn new(kind: SplitterKind) -> Self {
        Self {
            kind,
            corrector: None,
            stemmer: None,
            primary: true,
        }
    }

    pub fn corrector(mut self, corrector: Arc<dyn TextCorrector>) -> Self {
        self.corrector = Some(corrector);
        self
    }

    pub fn stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stemmer = Some(stemmer);
        self
    }

    /// Whether this splitter's results are final. Defaults to true; the
    /// no-split splitter is never primary.
    pub fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    pub fn build(self) -> Box<dyn Splitter> {
        let services = Services {
            corrector: self.corrector,
            stemmer: self.stemmer,
            primary: self.primary && self.kind != SplitterKind::None,
        };
        match self.kind {
            SplitterKind::None => Box::new(EmptySplitter::new(services)),
            SplitterKind::CamelCase => Box::new(CamelCaseSplitter::new(services)),
            SplitterKind::BestSuffix => Box::new(BestSuffixSplitter::new(services)),
        }
    }
}
