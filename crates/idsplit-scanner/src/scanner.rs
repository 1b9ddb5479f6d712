use idsplit_core::SourceFile;
use ignore::WalkBuilder;
use std::path::Path;

/// Walks a directory tree, respecting .gitignore rules, and produces the
/// source files to index.
pub struct Scanner<'a> {
    root: &'a Path,
    extensions: Option<Vec<String>>,
}

impl<'a> Scanner<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            extensions: None,
        }
    }

    /// Keep only files with one of these extensions (case-insensitive,
    /// without the dot).
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        );
        self
    }

    fn wanted(&self, file: &SourceFile) -> bool {
        self.extensions
            .as_ref()
            .is_none_or(|exts| exts.iter().any(|ext| *ext == file.extension))
    }

    /// Scan the tree and return every non-ignored file, sorted by name.
    /// A root that is itself a file yields just that file.
    pub fn scan(&self) -> anyhow::Result<Vec<SourceFile>> {
        if self.root.is_file() {
            let name = self
                .root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.root.display().to_string());
            let file = SourceFile::new(self.root, name);
            return Ok(if self.wanted(&file) { vec![file] } else { Vec::new() });
        }
        if !self.root.is_dir() {
            anyhow::bail!("{} is not a file or directory", self.root.display());
        }

        let mut files = Vec::new();

        // Dotfiles are source too; only ignore rules decide what is skipped.
        let walker = WalkBuilder::new(self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            // Unreadable entries (permissions, broken links) are skipped.
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let rel_path = match path.strip_prefix(self.root) {
                Ok(p) => p,
                Err(_) => continue,
            };
            // .git is not covered by any ignore file once hidden entries are walked.
            if rel_path.as_os_str().is_empty() || rel_path.starts_with(".git") {
                continue;
            }

            let file = SourceFile::new(path, rel_path.to_string_lossy());
            if self.wanted(&file) {
                files.push(file);
            }
        }

        // Walk order depends on the filesystem; learning order must not.
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}
