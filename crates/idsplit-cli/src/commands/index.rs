use crate::{Cli, SplitOptions};
use anyhow::{Context, Result};
use idsplit_core::ExtractType;
use idsplit_index::{FileList, Indexer, IndexerResult, LogNotifier, WordWithFiles, default_extractors};
use idsplit_scanner::Scanner;
use idsplit_split::SnowballStemmer;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub fn run(
    cli: &Cli,
    path: &Path,
    extract: ExtractType,
    limit: usize,
    options: &SplitOptions,
) -> Result<()> {
    let extractors = default_extractors()?;
    let extensions: Vec<&str> = extractors
        .iter()
        .flat_map(|e| e.extensions().iter().copied())
        .collect();

    let files = Scanner::new(path).extensions(extensions).scan()?;
    if !cli.is_quiet() {
        eprintln!("Indexing {} ({} files)...", path.display(), files.len());
    }

    let mut builder = Indexer::builder()
        .words(cli.word_dictionary()?)
        .splitter(options.splitter)
        .extractors(extractors)
        .extract_type(extract)
        .notifier(Box::new(LogNotifier))
        .files(files);
    if options.stem {
        builder = builder.stemmer(Arc::new(SnowballStemmer::new()));
    }
    if options.spell_check {
        builder = builder.spell_check();
    }

    let indexed = builder
        .build()?
        .run()
        .with_context(|| format!("Indexing {} failed", path.display()))?;
    let result = &indexed.result;

    if options.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    print_report(result, limit);

    if !cli.is_quiet() {
        let stats = indexed.tokens.stats();
        eprintln!(
            "Learned {} tokens, {} merged tokens, {} misspellings, {} stems from {} identifiers",
            stats.tokens,
            stats.merged_tokens,
            stats.misspellings,
            stats.stems,
            result.split_results().len()
        );
    }

    Ok(())
}

fn print_report(result: &IndexerResult, limit: usize) {
    print_bucket("Dictionary words", result.dictionary_words(), limit);
    print_bucket("Tokens", result.tokens(), limit);
    print_bucket("Unidentified", result.unidentified(), limit);
    print_resolved("Corrections", result.corrections(), limit);
    print_resolved("Stems", result.stemmed(), limit);
}

/// Most widespread entries first, then alphabetical.
fn print_bucket(title: &str, bucket: &BTreeMap<String, FileList>, limit: usize) {
    println!("{title} ({}):", bucket.len());
    let mut entries: Vec<(&String, &FileList)> = bucket.iter().collect();
    entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
    for (word, files) in entries.iter().take(limit) {
        println!("  {word:<24} {:>5} files", files.len());
    }
    if entries.len() > limit {
        println!("  ... {} more", entries.len() - limit);
    }
    println!();
}

fn print_resolved(title: &str, bucket: &BTreeMap<String, WordWithFiles>, limit: usize) {
    println!("{title} ({}):", bucket.len());
    for (word, entry) in bucket.iter().take(limit) {
        let target = entry.word.as_deref().unwrap_or("?");
        println!("  {word:<24} -> {target:<24} {:>5} files", entry.files.len());
    }
    if bucket.len() > limit {
        println!("  ... {} more", bucket.len() - limit);
    }
    println!();
}
