use super::*;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_DATASET: &str = r#"[
  {
    "word": "Hygge",
    "native_script": "Hygge",
    "language": "Danish",
    "definition": "A cozy quality that makes a person feel content",
    "disputed": "False",
    "region": "Denmark",
    "embedding": [
      0.0123,
      -0.5,
      1.0
    ]
  },
  {
    "word": "Ikigai",
    "native_script": "生き甲斐",
    "language": "Japanese",
    "definition": "Reason for being",
    "searchableText": "ikigai reason for being"
  }
]"#;

#[test]
fn missing_file_loads_as_empty_dataset() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("absent.json");

    let records = load_dataset(&path).expect("missing dataset should load as empty");
    assert!(records.is_empty());
}

#[test]
fn missing_file_is_not_found_when_required() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("absent.json");

    let result = load_existing_dataset(&path);
    assert!(matches!(result, Err(PrepError::NotFound(p)) if p == path));
}

#[test]
fn malformed_file_is_parse_error() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "[{\"word\": ").expect("should write fixture");

    assert!(matches!(load_dataset(&path), Err(PrepError::Parse { .. })));
    assert!(matches!(
        load_existing_dataset(&path),
        Err(PrepError::Parse { .. })
    ));
}

#[test]
fn non_array_file_is_parse_error() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("object.json");
    fs::write(&path, r#"{"word": "Hygge"}"#).expect("should write fixture");

    assert!(matches!(load_dataset(&path), Err(PrepError::Parse { .. })));
}

#[test]
fn round_trip_is_byte_stable() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let input = temp_dir.path().join("words.json");
    let output = temp_dir.path().join("words-copy.json");
    fs::write(&input, SAMPLE_DATASET).expect("should write fixture");

    let records = load_dataset(&input).expect("should load dataset");
    assert_eq!(records.len(), 2);
    save_dataset(&output, &records).expect("should save dataset");

    let written = fs::read_to_string(&output).expect("should read output");
    assert_eq!(written, SAMPLE_DATASET);
}

#[test]
fn round_trip_keeps_foreign_key_order_and_nulls() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let input = temp_dir.path().join("words.json");
    let output = temp_dir.path().join("words-copy.json");
    let content = r#"[
  {
    "language": "Danish",
    "word": "Hygge",
    "transliteration": null,
    "family": 7
  },
  {
    "searchableText": "fernweh",
    "definition": "Longing for far-off places",
    "word": "Fernweh"
  }
]"#;
    fs::write(&input, content).expect("should write fixture");

    let records = load_dataset(&input).expect("should load dataset");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].headword(), "Hygge");
    assert_eq!(records[0].family, None);
    save_dataset(&output, &records).expect("should save dataset");

    let written = fs::read_to_string(&output).expect("should read output");
    assert_eq!(written, content);
}

#[test]
fn writer_leaves_non_ascii_unescaped() {
    let records = vec![WordRecord {
        word: "Arbejdsglæde".to_string(),
        native_script: Some("生き甲斐".to_string()),
        ..WordRecord::default()
    }];

    let text = to_json_string(&records).expect("should serialize dataset");
    assert!(text.contains("Arbejdsglæde"));
    assert!(text.contains("生き甲斐"));
    assert!(!text.contains("\\u"));
    assert!(text.starts_with("[\n  {\n    \"word\""));
}

#[test]
fn save_creates_parent_directory() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("public").join("data").join("words.json");

    save_dataset::<WordRecord>(&path, &[]).expect("should save empty dataset");
    assert_eq!(
        fs::read_to_string(&path).expect("should read output"),
        "[]"
    );
}

#[test]
fn save_into_a_file_path_is_persistence_error() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").expect("should write fixture");

    let result = save_dataset::<WordRecord>(&blocker.join("words.json"), &[]);
    assert!(matches!(result, Err(PrepError::Persistence { .. })));
}

#[test]
fn merged_output_path_naming() {
    assert_eq!(
        merged_output_path(Path::new("public/data/words-with-embeddings.json")),
        Path::new("public/data/words.json")
    );
    assert_eq!(
        merged_output_path(Path::new("public/data/words.json")),
        Path::new("public/data/words-updated.json")
    );
    assert_eq!(
        merged_output_path(Path::new("words")),
        Path::new("words-updated")
    );
}

#[test]
fn embedded_output_path_naming() {
    assert_eq!(
        embedded_output_path(Path::new("public/data/words-updated.json")),
        Path::new("public/data/words-updated-with-embeddings.json")
    );
    assert_eq!(
        embedded_output_path(Path::new("words")),
        Path::new("words-with-embeddings.json")
    );
}

#[test]
fn candidates_load_from_loose_json() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");
    let path = temp_dir.path().join("new-words.json");
    fs::write(
        &path,
        r#"[{"word": "Fernweh", "language": "German"}, {"word": "Hygge", "notes": "extra"}]"#,
    )
    .expect("should write fixture");

    let candidates = load_candidates(&path).expect("should load candidates");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].language.as_deref(), Some("German"));
    assert_eq!(candidates[1].headword(), "Hygge");

    assert!(matches!(
        load_candidates(&temp_dir.path().join("absent.json")),
        Err(PrepError::NotFound(_))
    ));
}
