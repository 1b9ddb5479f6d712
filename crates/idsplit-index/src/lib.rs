//! Two-pass project indexing: learn project tokens from every file, then
//! split every identifier and aggregate the vocabulary by classification.

mod extract;
mod indexer;
mod notify;
mod result;

pub use extract::{CFamilyExtractor, TextExtractor, default_extractors};
pub use indexer::{Indexed, Indexer, IndexerBuilder};
pub use notify::{LogNotifier, Notifier, Question, Stage, progress_percent};
pub use result::{FileList, IndexerResult, WordWithFiles};
