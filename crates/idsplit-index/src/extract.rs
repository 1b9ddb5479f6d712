use idsplit_core::{ExtractType, IdsplitError};
use regex::Regex;
use std::collections::HashSet;

/// Pulls identifier text out of a source file.
pub trait TextExtractor: Send + Sync {
    /// Lower-case extensions, without the dot, this extractor handles.
    fn extensions(&self) -> &[&'static str];

    /// Every letter run in the file. Feeds the build phase.
    fn extract_all(&self, text: &str) -> Vec<String>;

    /// The requested parts of the file: comment words first, then string
    /// literal words and identifiers in file order.
    fn extract(&self, text: &str, kind: ExtractType) -> Vec<String>;
}

const LETTERS: &str = r"[A-Za-z]+";

const WORD: &str = r"[A-Za-z_][A-Za-z0-9_]*";

// Alternation order matters: comments and literals must win over the
// identifiers inside them.
const LEXEME: &str = concat!(
    r"(?P<line>//[^\n]*)",
    r"|(?P<block>(?s:/\*.*?\*/))",
    r#"|(?P<string>"(?:\\.|[^"\\])*")"#,
    r"|(?P<char>'(?:\\[^\n]{1,8}?|[^'\\\n])')",
    r"|(?P<ident>[A-Za-z_][A-Za-z0-9_]*)",
);

fn compile(pattern: &str) -> Result<Regex, IdsplitError> {
    Regex::new(pattern).map_err(|e| IdsplitError::Config(format!("invalid extractor pattern: {e}")))
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "false", "try", "void", "volatile", "while", "var", "record",
];

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "var",
    "virtual", "void", "volatile", "while", "async", "await", "get", "set", "value", "yield",
];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "bool", "catch", "class", "constexpr",
    "delete", "explicit", "false", "friend", "mutable", "namespace", "new", "noexcept",
    "nullptr", "operator", "private", "protected", "public", "template", "this", "throw",
    "true", "try", "typename", "using", "virtual", "include", "define", "ifdef", "ifndef",
    "endif", "pragma",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

/// Lexical extractor for languages with `//` and `/* */` comments and
/// double-quoted strings.
#[derive(Debug, Clone)]
pub struct CFamilyExtractor {
    extensions: Vec<&'static str>,
    keywords: HashSet<&'static str>,
    letters: Regex,
    word: Regex,
    lexeme: Regex,
}

impl CFamilyExtractor {
    pub fn new(
        extensions: &[&'static str],
        keywords: &[&'static str],
    ) -> Result<Self, IdsplitError> {
        Ok(Self {
            extensions: extensions.to_vec(),
            keywords: keywords.iter().copied().collect(),
            letters: compile(LETTERS)?,
            word: compile(WORD)?,
            lexeme: compile(LEXEME)?,
        })
    }

    pub fn java() -> Result<Self, IdsplitError> {
        Self::new(&["java"], JAVA_KEYWORDS)
    }

    pub fn csharp() -> Result<Self, IdsplitError> {
        Self::new(&["cs"], CSHARP_KEYWORDS)
    }

    pub fn c_cpp() -> Result<Self, IdsplitError> {
        Self::new(&["c", "h", "cc", "cpp", "cxx", "hpp", "hh"], C_KEYWORDS)
    }

    pub fn rust() -> Result<Self, IdsplitError> {
        Self::new(&["rs"], RUST_KEYWORDS)
    }

    fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    fn words_in(&self, text: &str) -> Vec<String> {
        self.word.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

impl TextExtractor for CFamilyExtractor {
    fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        self.letters
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract(&self, text: &str, kind: ExtractType) -> Vec<String> {
        let want_comments = kind.wants(ExtractType::COMMENTS);
        let want_code = kind.wants(ExtractType::IDENTIFIERS_AND_STRING_LITERALS);

        let mut comments = Vec::new();
        let mut code = Vec::new();

        for caps in self.lexeme.captures_iter(text) {
            if let Some(m) = caps.name("line").or_else(|| caps.name("block")) {
                if want_comments {
                    comments.extend(self.words_in(m.as_str()));
                }
            } else if let Some(m) = caps.name("string").or_else(|| caps.name("char")) {
                if want_code {
                    code.extend(self.words_in(m.as_str()));
                }
            } else if let Some(m) = caps.name("ident") {
                if want_code && !self.is_keyword(m.as_str()) {
                    code.push(m.as_str().to_string());
                }
            }
        }

        comments.extend(code);
        comments
    }
}

/// Extractors for Java, C#, C/C++ and Rust.
pub fn default_extractors() -> Result<Vec<Box<dyn TextExtractor>>, IdsplitError> {
    Ok(vec![
        Box::new(CFamilyExtractor::java()?),
        Box::new(CFamilyExtractor::csharp()?),
        Box::new(CFamilyExtractor::c_cpp()?),
        Box::new(CFamilyExtractor::rust()?),
    ])
}
