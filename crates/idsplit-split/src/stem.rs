use rust_stemmers::{Algorithm, Stemmer as Snowball};

/// Reduces a word to its stem.
pub trait Stemmer: Send + Sync {
    /// The stem of `text`, or `None` when stemming leaves it unchanged.
    fn stem(&self, text: &str) -> Option<String>;
}

/// English Snowball (Porter 2) stemmer.
pub struct SnowballStemmer {
    inner: Snowball,
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self {
            inner: Snowball::create(Algorithm::English),
        }
    }
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnowballStemmer(English)")
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        let stem = self.inner.stem(&lower);
        (stem.as_ref() != lower.as_str()).then(|| stem.into_owned())
    }
}
