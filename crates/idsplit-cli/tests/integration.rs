//! Integration test: scan a project, index it, and drive the binary.

use idsplit_core::ExtractType;
use idsplit_dict::{CustomDictionary, StopWords, WordDictionary};
use idsplit_index::{Indexer, default_extractors};
use idsplit_scanner::Scanner;
use idsplit_split::{SnowballStemmer, SplitterKind};
use std::fs;
use std::process::Command;
use std::sync::Arc;

fn create_test_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("src/main/java")).unwrap();
    fs::write(
        root.join("src/main/java/UserMgr.java"),
        "// Loads the user records\npublic class UserMgr {\n    private int userCount;\n    public int getUserCount() { return userCount; }\n}\n",
    )
    .unwrap();
    fs::write(
        root.join("src/main/java/FileMgr.java"),
        "public class FileMgr {\n    private String fileName = \"data\";\n    void loadFile() {}\n}\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("native")).unwrap();
    fs::write(
        root.join("native/reader.c"),
        "/* reads numbers */\nint readNumber(char *buf) { return parseNumber(buf); }\n",
    )
    .unwrap();

    fs::write(root.join("README.md"), "# Demo project").unwrap();
    fs::write(root.join(".ignore"), "build/\n").unwrap();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/Generated.java"), "class Generated { int zzTop; }").unwrap();

    dir
}

fn words() -> Arc<WordDictionary> {
    Arc::new(
        WordDictionary::builder()
            .bundled_english()
            .stop_words(StopWords::default())
            .build()
            .unwrap(),
    )
}

fn scan(dir: &tempfile::TempDir) -> Vec<idsplit_core::SourceFile> {
    let extensions: Vec<&str> = default_extractors()
        .unwrap()
        .iter()
        .flat_map(|e| e.extensions().to_vec())
        .collect();
    Scanner::new(dir.path()).extensions(extensions).scan().unwrap()
}

#[test]
fn scan_keeps_source_files_only() {
    let dir = create_test_project();
    let names: Vec<String> = scan(&dir).into_iter().map(|f| f.name).collect();

    assert_eq!(names.len(), 3);
    assert!(names.iter().any(|n| n.ends_with("UserMgr.java")));
    assert!(names.iter().any(|n| n.ends_with("reader.c")));
    assert!(!names.iter().any(|n| n.contains("Generated")));
    assert!(!names.iter().any(|n| n.ends_with(".md")));
}

#[test]
fn index_learns_project_tokens() {
    let dir = create_test_project();
    let indexed = Indexer::builder()
        .words(words())
        .splitter(SplitterKind::BestSuffix)
        .extractors(default_extractors().unwrap())
        .files(scan(&dir))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert!(indexed.tokens.is_token("mgr"));

    let result = &indexed.result;
    assert_eq!(result.tokens()["mgr"].len(), 2);
    assert!(result.dictionary_words().contains_key("user"));
    assert!(result.dictionary_words().contains_key("file"));
    assert!(result.dictionary_words().contains_key("number"));
    assert!(!result.dictionary_words().contains_key("the"));
    assert!(result.merged_tokens().is_empty());
    assert!(
        result
            .split_results()
            .iter()
            .all(|r| !r.file.name.contains("Generated"))
    );
}

#[test]
fn index_with_stemming_moves_inflections() {
    let dir = create_test_project();
    let indexed = Indexer::builder()
        .words(words())
        .splitter(SplitterKind::BestSuffix)
        .extractors(default_extractors().unwrap())
        .extract_type(ExtractType::COMMENTS)
        .stemmer(Arc::new(SnowballStemmer::new()))
        .files(scan(&dir))
        .build()
        .unwrap()
        .run()
        .unwrap();

    let result = &indexed.result;
    assert!(result.dictionary_words().contains_key("number"));
    assert!(!result.dictionary_words().contains_key("numbers"));
    assert_eq!(result.stemmed()["numbers"].word.as_deref(), Some("number"));
}

#[test]
fn custom_words_feed_the_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.txt");
    let custom = CustomDictionary::new(&path);
    custom.save(&["grpc".to_string(), "oauth".to_string()]).unwrap();

    let words = WordDictionary::builder().custom_dictionary(&path).build().unwrap();
    assert!(words.is_word("grpc"));
    assert!(words.is_word("OAuth"));
}

// --- Binary ---

fn idsplit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_idsplit"))
}

#[test]
fn split_command_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = idsplit()
        .current_dir(dir.path())
        .args(["split", "--json", "--splitter", "camel-case", "getUserName"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["identifier"], "getUserName");
    let texts: Vec<&str> = json[0]["splits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["get", "User", "Name"]);
    assert_eq!(json[0]["splits"][0]["identification"], "identified");
}

#[test]
fn words_command_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("user.txt");
    let file_arg = file.to_str().unwrap();

    let status = idsplit()
        .args(["words", "--user-dictionary", file_arg, "add", "Grpc", "oauth", "grpc"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&file).unwrap(), "grpc\noauth\n");

    let status = idsplit()
        .args(["words", "--user-dictionary", file_arg, "remove", "GRPC"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = idsplit()
        .args(["-q", "words", "--user-dictionary", file_arg, "list"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "oauth\n");
}

#[test]
fn index_command_prints_json() {
    let dir = create_test_project();
    let output = idsplit()
        .args(["-q", "index", "--json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["tokens"]["mgr"].is_array());
    assert!(json["dictionary_words"]["user"].is_array());
}
