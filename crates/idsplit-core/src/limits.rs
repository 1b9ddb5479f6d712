/// Occurrences a candidate token or merged token needs before it is promoted.
pub const TOKEN_COUNT: usize = 2;

/// Shortest text handed to the stemmer or the spell corrector.
pub const MIN_MISSPELLED_STEMMED_LENGTH: usize = 4;

/// Shortest all-caps run that is classified as a single unit.
pub const MIN_TOKEN_LENGTH_FOR_CAPS: usize = 2;

/// Shortest fragment that may become a token. Identifiers with fewer letters
/// are never analyzed.
pub const MIN_TOKEN_LENGTH: usize = 3;

/// Largest edit distance the Levenshtein corrector accepts.
pub const MAX_CORRECTION_DISTANCE: usize = 2;

/// Whether `text` is long enough to be learned as a token.
pub fn can_be_token(text: &str) -> bool {
    text.chars().count() >= MIN_TOKEN_LENGTH
}
