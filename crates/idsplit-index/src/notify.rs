use serde::Serialize;
use std::fmt;

/// What the indexer is doing when it reports status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AnalyzingFile,
    IdentifyingToken,
    ReadingFileForIdentifiers,
    Splitting,
    Stemming,
    Completed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AnalyzingFile => "analyzing file",
            Self::IdentifyingToken => "identifying tokens",
            Self::ReadingFileForIdentifiers => "reading file for identifiers",
            Self::Splitting => "splitting",
            Self::Stemming => "stemming",
            Self::Completed => "indexing completed",
        })
    }
}

/// A yes/no decision the indexer hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    /// No extractor handles the file's extension. Yes skips the file.
    NoExtractor,
    /// The file could not be read or processed. Yes skips the file, no
    /// aborts the run.
    FileReadError,
}

/// Receives progress from a running indexer. Every method has a default, so
/// an implementation only overrides what it cares about.
pub trait Notifier: Send + Sync {
    fn update_status(&self, _stage: Stage, _completed: usize, _total: usize, _message: &str) {}

    /// Overall progress in percent, 0.0 to 100.0.
    fn update_progress(&self, _percent: f64) {}

    fn ask(&self, _question: Question, _message: &str) -> bool {
        true
    }
}

/// Routes status to `tracing` and always answers yes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn update_status(&self, stage: Stage, completed: usize, total: usize, message: &str) {
        match stage {
            Stage::Completed => tracing::info!(%stage, "{message}"),
            _ => tracing::debug!(%stage, completed, total, "{message}"),
        }
    }

    fn ask(&self, question: Question, message: &str) -> bool {
        tracing::warn!(?question, "skipping: {message}");
        true
    }
}

/// Overall percent for `completed` of `total` within `stage`.
///
/// With stemming the build pass covers 0-45, the result pass 45-90 and
/// stemming 90-100. Without it the passes split the range in half.
pub fn progress_percent(stage: Stage, completed: usize, total: usize, stemming: bool) -> f64 {
    let half = if stemming { 45.0 } else { 50.0 };
    let (start, range) = match stage {
        Stage::AnalyzingFile | Stage::IdentifyingToken => (0.0, half),
        Stage::ReadingFileForIdentifiers | Stage::Splitting => (half, half),
        Stage::Stemming => (90.0, 10.0),
        Stage::Completed => (100.0, 0.0),
    };
    let fraction = if total == 0 {
        1.0
    } else {
        completed as f64 / total as f64
    };
    start + range * fraction
}

/// The indexer's view of an optional notifier.
pub(crate) struct Progress<'a> {
    notifier: Option<&'a dyn Notifier>,
    stemming: bool,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(notifier: Option<&'a dyn Notifier>, stemming: bool) -> Self {
        Self { notifier, stemming }
    }

    pub(crate) fn status(&self, stage: Stage, completed: usize, total: usize, message: &str) {
        if let Some(notifier) = self.notifier {
            notifier.update_status(stage, completed, total, message);
            notifier.update_progress(progress_percent(stage, completed, total, self.stemming));
        }
    }

    /// Without a notifier every question is answered yes.
    pub(crate) fn ask(&self, question: Question, message: &str) -> bool {
        self.notifier.is_none_or(|n| n.ask(question, message))
    }
}
