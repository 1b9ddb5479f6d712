use crate::{Cli, SplitOptions};
use anyhow::Result;
use idsplit_core::SplitWithIdentification;
use idsplit_dict::TokenDictionary;
use idsplit_split::{LevenshteinCorrector, Phase, SnowballStemmer, SplitterBuilder};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct SplitOutput<'a> {
    identifier: &'a str,
    splits: Vec<SplitWithIdentification>,
}

pub fn run(cli: &Cli, identifiers: &[String], options: &SplitOptions) -> Result<()> {
    let words = cli.word_dictionary()?;
    let mut tokens = TokenDictionary::new(words);

    let mut builder = SplitterBuilder::new(options.splitter);
    if options.stem {
        builder = builder.stemmer(Arc::new(SnowballStemmer::new()));
    }
    if options.spell_check {
        builder = builder.corrector(Arc::new(LevenshteinCorrector::new()));
    }
    let mut splitter = builder.build();

    // The identifiers double as the corpus the splitter learns from.
    for identifier in identifiers {
        splitter.update_token_dictionary(&mut tokens, identifier);
    }

    let outputs: Vec<SplitOutput> = identifiers
        .iter()
        .map(|identifier| SplitOutput {
            identifier,
            splits: splitter.split(&mut tokens, identifier, Phase::Result),
        })
        .collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    if !cli.is_quiet() {
        eprintln!("Splitter: {}", splitter.display_name());
    }
    for output in &outputs {
        let parts: Vec<String> = output
            .splits
            .iter()
            .map(|s| format!("{} ({})", s.text, s.identification))
            .collect();
        println!("{:<24} {}", output.identifier, parts.join("  "));
    }

    Ok(())
}
