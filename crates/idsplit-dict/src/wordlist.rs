use idsplit_core::IdsplitError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Bundled base lexicon of common English words found in identifiers.
pub const ENGLISH_WORDS: &str = include_str!("../data/english_words.txt");
pub const ENGLISH_STOP_WORDS: &str = include_str!("../data/english_stop_words.txt");
pub const JAVA_KEYWORDS: &str = include_str!("../data/java_keywords.txt");
pub const CPP_KEYWORDS: &str = include_str!("../data/cpp_keywords.txt");
pub const CSHARP_KEYWORDS: &str = include_str!("../data/csharp_keywords.txt");

/// Lower-cased, non-blank lines of a newline-delimited word list.
pub fn parse_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
}

/// The user's own word list: one word per line, read whole and saved whole.
#[derive(Debug, Clone)]
pub struct CustomDictionary {
    path: PathBuf,
}

impl CustomDictionary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every non-blank line, or nothing when the file does not exist yet.
    pub fn load(&self) -> Result<Vec<String>, IdsplitError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrite the file with `words`, one per line.
    pub fn save(&self, words: &[String]) -> Result<(), IdsplitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut text = words.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse_words ---

    #[test]
    fn parse_words_handles_crlf_and_case() {
        let words: Vec<String> = parse_words("Alpha\r\nbeta\n\n  Gamma  \n").collect();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn bundled_lists_are_lowercase_and_non_empty() {
        for list in [
            ENGLISH_WORDS,
            ENGLISH_STOP_WORDS,
            JAVA_KEYWORDS,
            CPP_KEYWORDS,
            CSHARP_KEYWORDS,
        ] {
            let words: Vec<String> = parse_words(list).collect();
            assert!(!words.is_empty());
            assert!(words.iter().all(|w| *w == w.to_lowercase()));
        }
    }

    #[test]
    fn bundled_english_contains_common_identifier_words() {
        let words: Vec<String> = parse_words(ENGLISH_WORDS).collect();
        for expected in ["get", "user", "name", "file", "manager"] {
            assert!(words.iter().any(|w| w == expected), "missing {expected}");
        }
    }

    // --- CustomDictionary ---

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let custom = CustomDictionary::new(dir.path().join("custom.txt"));
        assert!(custom.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let custom = CustomDictionary::new(dir.path().join("nested/custom.txt"));
        custom
            .save(&["kubectl".to_string(), "Grpc".to_string()])
            .unwrap();
        assert_eq!(custom.load().unwrap(), vec!["kubectl", "Grpc"]);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        fs::write(&path, "old\nwords\n").unwrap();

        let custom = CustomDictionary::new(&path);
        custom.save(&["fresh".to_string()]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn load_reads_crlf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.txt");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();
        assert_eq!(CustomDictionary::new(&path).load().unwrap(), vec!["one", "two"]);
    }
}
