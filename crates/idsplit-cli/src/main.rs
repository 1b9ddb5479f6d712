mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use idsplit_core::ExtractType;
use idsplit_dict::{StopWords, WordDictionary};
use idsplit_split::SplitterKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// idsplit: split source-code identifiers into words and index a project's vocabulary.
#[derive(Parser, Debug)]
#[command(name = "idsplit", version, about)]
pub struct Cli {
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Extra word list (one word per line); may be repeated
    #[arg(long = "words", value_name = "FILE", global = true)]
    word_files: Vec<PathBuf>,

    /// User dictionary file
    #[arg(long, value_name = "FILE", global = true, default_value = ".idsplit/words.txt")]
    user_dictionary: PathBuf,

    /// Keep programming keywords in the results
    #[arg(long, global = true)]
    no_programming_stop_words: bool,

    /// Keep English stop words in the results
    #[arg(long, global = true)]
    no_english_stop_words: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split identifiers given on the command line
    Split {
        /// Identifiers to split; all of them are learned from before splitting
        #[arg(required = true)]
        identifiers: Vec<String>,

        #[command(flatten)]
        options: SplitOptions,
    },

    /// Index every source file under a directory
    Index {
        /// Directory or file to index
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Which parts of each file to split
        #[arg(long, value_enum, default_value_t = ExtractArg::All)]
        extract: ExtractArg,

        /// Entries shown per section in the text report
        #[arg(long, default_value_t = 20)]
        limit: usize,

        #[command(flatten)]
        options: SplitOptions,
    },

    /// Manage the user dictionary
    Words {
        #[command(subcommand)]
        action: WordsAction,
    },
}

#[derive(clap::Args, Debug)]
struct SplitOptions {
    /// Splitting algorithm: none, camel-case or best-suffix
    #[arg(long, default_value = "best-suffix")]
    splitter: SplitterKind,

    /// Recognize inflected forms through an English stemmer
    #[arg(long)]
    stem: bool,

    /// Correct misspelled fragments
    #[arg(long)]
    spell_check: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum WordsAction {
    /// Print the user dictionary
    List,
    /// Add words to the user dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Remove words from the user dictionary
    Remove {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExtractArg {
    Comments,
    Identifiers,
    All,
}

impl From<ExtractArg> for ExtractType {
    fn from(arg: ExtractArg) -> Self {
        match arg {
            ExtractArg::Comments => ExtractType::COMMENTS,
            ExtractArg::Identifiers => ExtractType::IDENTIFIERS_AND_STRING_LITERALS,
            ExtractArg::All => ExtractType::ALL,
        }
    }
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// The bundled lexicon plus `--words` files and the user dictionary.
    pub fn word_dictionary(&self) -> Result<Arc<WordDictionary>> {
        let words = WordDictionary::builder()
            .bundled_english()
            .stop_words(StopWords {
                programming: !self.no_programming_stop_words,
                english: !self.no_english_stop_words,
            })
            .custom_dictionary(&self.user_dictionary);
        let words = self
            .word_files
            .iter()
            .fold(words, |builder, path| builder.word_list_file(path))
            .build()
            .context("Failed to load word lists")?;
        Ok(Arc::new(words))
    }
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Commands::Split {
            identifiers,
            options,
        } => commands::split::run(&cli, identifiers, options),
        Commands::Index {
            path,
            extract,
            limit,
            options,
        } => commands::index::run(&cli, path, (*extract).into(), *limit, options),
        Commands::Words { action } => commands::words::run(&cli, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_requires_a_command() {
        assert!(Cli::try_parse_from(["idsplit"]).is_err());
    }

    #[test]
    fn cli_parses_verbose_anywhere() {
        let cli = Cli::try_parse_from(["idsplit", "split", "-vv", "getName"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn cli_parses_quiet() {
        let cli = Cli::try_parse_from(["idsplit", "--quiet", "words", "list"]).unwrap();
        assert!(cli.is_quiet());
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn split_defaults_to_best_suffix() {
        let cli = Cli::try_parse_from(["idsplit", "split", "getUserName", "setValue"]).unwrap();
        let Commands::Split {
            identifiers,
            options,
        } = cli.command
        else {
            panic!("expected split");
        };
        assert_eq!(identifiers, vec!["getUserName", "setValue"]);
        assert_eq!(options.splitter, SplitterKind::BestSuffix);
        assert!(!options.stem);
    }

    #[test]
    fn split_accepts_splitter_names() {
        let cli =
            Cli::try_parse_from(["idsplit", "split", "--splitter", "camel-case", "getName"]).unwrap();
        let Commands::Split { options, .. } = cli.command else {
            panic!("expected split");
        };
        assert_eq!(options.splitter, SplitterKind::CamelCase);

        assert!(Cli::try_parse_from(["idsplit", "split", "--splitter", "fancy", "x"]).is_err());
    }

    #[test]
    fn index_options() {
        let cli = Cli::try_parse_from([
            "idsplit",
            "index",
            "src",
            "--extract",
            "comments",
            "--stem",
            "--spell-check",
            "--json",
            "--words",
            "a.txt",
            "--words",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(cli.word_files.len(), 2);
        let Commands::Index {
            path,
            extract,
            options,
            ..
        } = cli.command
        else {
            panic!("expected index");
        };
        assert_eq!(path, PathBuf::from("src"));
        assert_eq!(ExtractType::from(extract), ExtractType::COMMENTS);
        assert!(options.stem && options.spell_check && options.json);
    }

    #[test]
    fn words_subcommands() {
        let cli = Cli::try_parse_from(["idsplit", "words", "add", "grpc", "oauth"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Words {
                action: WordsAction::Add { ref words }
            } if words.len() == 2
        ));
        assert_eq!(cli.user_dictionary, PathBuf::from(".idsplit/words.txt"));
    }
}
