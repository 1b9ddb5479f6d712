use crate::{Cli, WordsAction};
use anyhow::{Context, Result};
use idsplit_dict::CustomDictionary;

pub fn run(cli: &Cli, action: &WordsAction) -> Result<()> {
    let dictionary = CustomDictionary::new(&cli.user_dictionary);
    let mut words = dictionary
        .load()
        .with_context(|| format!("Failed to read {}", dictionary.path().display()))?;

    match action {
        WordsAction::List => {
            for word in &words {
                println!("{word}");
            }
            if !cli.is_quiet() {
                eprintln!("{} words in {}", words.len(), dictionary.path().display());
            }
            return Ok(());
        }
        WordsAction::Add { words: added } => {
            let mut count = 0;
            for word in added {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !words.contains(&word) {
                    words.push(word);
                    count += 1;
                }
            }
            if !cli.is_quiet() {
                eprintln!("Added {count} words");
            }
        }
        WordsAction::Remove { words: removed } => {
            let removed: Vec<String> = removed.iter().map(|w| w.trim().to_lowercase()).collect();
            let before = words.len();
            words.retain(|word| !removed.contains(&word.to_lowercase()));
            if !cli.is_quiet() {
                eprintln!("Removed {} words", before - words.len());
            }
        }
    }

    dictionary
        .save(&words)
        .with_context(|| format!("Failed to write {}", dictionary.path().display()))?;
    Ok(())
}
