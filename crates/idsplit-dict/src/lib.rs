//! Trie-backed word, stop-word, and project token dictionaries.

mod tokens;
mod trie;
pub mod wordlist;
mod words;

pub use tokens::{Replacement, TokenDictionary, TokenStats};
pub use trie::{Trie, TrieNode};
pub use wordlist::CustomDictionary;
pub use words::{StopWords, WordDictionary, WordDictionaryBuilder};
