/// Errors that can occur in idsplit operations.
#[derive(Debug, thiserror::Error)]
pub enum IdsplitError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),

    /// An edge for this character already hangs off the trie node.
    #[error("duplicate trie edge '{0}'")]
    DuplicateEdge(char),

    #[error("a text extractor is already registered for extension '{0}'")]
    DuplicateExtractor(String),

    #[error("no text extractor registered for extension '{extension}' ({path})")]
    NoExtractor { extension: String, path: String },

    #[error("failed to read {path}: {message}")]
    FileRead { path: String, message: String },
}

impl From<std::io::Error> for IdsplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
