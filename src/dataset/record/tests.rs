use super::*;
use serde_json::json;

#[test]
fn unknown_fields_keep_their_position() {
    let value = json!({
        "searchableText": "hygge cozy",
        "word": "Hygge",
        "language": "Danish",
    });

    let record: WordRecord = serde_json::from_value(value).expect("should deserialize record");
    assert_eq!(record.word, "Hygge");
    assert_eq!(record.language.as_deref(), Some("Danish"));
    assert_eq!(
        record.extra.get("searchableText"),
        Some(&json!("hygge cozy"))
    );

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(
        text,
        r#"{"searchableText":"hygge cozy","word":"Hygge","language":"Danish"}"#
    );
}

#[test]
fn records_built_in_code_use_field_order() {
    let mut record = WordRecord {
        word: "Hygge".to_string(),
        region: Some("Denmark".to_string()),
        language: Some("Danish".to_string()),
        ..WordRecord::default()
    };
    record
        .extra
        .insert("searchableText".to_string(), json!("hygge"));

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(
        text,
        r#"{"word":"Hygge","language":"Danish","region":"Denmark","searchableText":"hygge"}"#
    );
}

#[test]
fn key_order_and_nulls_survive_a_round_trip() {
    let input = r#"{"language":"Danish","word":"Hygge","transliteration":null,"embedding":null}"#;

    let record: WordRecord = serde_json::from_str(input).expect("should deserialize record");
    assert_eq!(record.word, "Hygge");
    assert_eq!(record.transliteration, None);
    assert!(!record.has_embedding());
    assert_eq!(record.extra.get("transliteration"), Some(&Value::Null));

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(text, input);
}

#[test]
fn off_type_values_are_kept_verbatim() {
    let input = r#"{"word":"Hygge","family":7,"disputed":0,"sources":["a","b"],"embedding":"pending"}"#;

    let record: WordRecord = serde_json::from_str(input).expect("should deserialize record");
    assert_eq!(record.word, "Hygge");
    assert_eq!(record.family, None);
    assert_eq!(record.disputed, None);
    assert!(!record.has_embedding());
    assert_eq!(record.extra.get("family"), Some(&json!(7)));

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(text, input);
}

#[test]
fn off_type_headword_is_kept() {
    let input = r#"{"word":42,"language":"Klingon"}"#;

    let record: WordRecord = serde_json::from_str(input).expect("should deserialize record");
    assert_eq!(record.display_word(), "unknown");

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(text, input);
}

#[test]
fn embedding_added_after_load_takes_the_null_slot() {
    let mut record: WordRecord =
        serde_json::from_str(r#"{"word":"Fernweh","embedding":null,"searchableText":"fernweh"}"#)
            .expect("should deserialize record");
    record.embedding = Some(vec![0.5]);

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(
        text,
        r#"{"word":"Fernweh","embedding":[0.5],"searchableText":"fernweh"}"#
    );
}

#[test]
fn loaded_record_without_word_stays_without_one() {
    let record: WordRecord =
        serde_json::from_str(r#"{"language":"Danish"}"#).expect("should deserialize record");
    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(text, r#"{"language":"Danish"}"#);
}

#[test]
fn absent_optional_fields_stay_absent() {
    let record: WordRecord =
        serde_json::from_str(r#"{"word":"Ikigai"}"#).expect("should deserialize record");
    let text = serde_json::to_string(&record).expect("should serialize record");
    assert_eq!(text, r#"{"word":"Ikigai"}"#);
}

#[test]
fn flags_keep_their_original_text() {
    let record: WordRecord = serde_json::from_str(
        r#"{"word":"Saudade","disputed":"True","loanword_in_english":"False","needs_citation":true}"#,
    )
    .expect("should deserialize record");

    assert!(record.is_disputed());
    assert!(!record.is_loanword_in_english());
    assert!(record.needs_citation());
    assert_eq!(record.disputed, Some(Flag::Text("True".to_string())));

    let text = serde_json::to_string(&record).expect("should serialize record");
    assert!(text.contains(r#""disputed":"True""#));
    assert!(text.contains(r#""needs_citation":true"#));
}

#[test]
fn default_flag_is_false() {
    let flag = Flag::default();
    assert_eq!(flag, Flag::Text("false".to_string()));
    assert!(!flag.is_set());
}

#[test]
fn has_embedding_requires_non_empty_vector() {
    let mut record = WordRecord {
        word: "Fernweh".to_string(),
        ..WordRecord::default()
    };
    assert!(!record.has_embedding());

    record.embedding = Some(Vec::new());
    assert!(!record.has_embedding());

    record.embedding = Some(vec![0.25, -0.5]);
    assert!(record.has_embedding());
}

#[test]
fn display_word_falls_back_for_blank_words() {
    let record = WordRecord::default();
    assert_eq!(record.display_word(), "unknown");

    let record = WordRecord {
        word: "Tsundoku".to_string(),
        ..WordRecord::default()
    };
    assert_eq!(record.display_word(), "Tsundoku");
}

#[test]
fn raw_word_ignores_unknown_keys() {
    let raw: RawWord = serde_json::from_value(json!({
        "word": "Abbiocco",
        "language": "Italian",
        "popularity": 7,
    }))
    .expect("should deserialize raw word");

    assert_eq!(raw.headword(), "Abbiocco");
    assert_eq!(raw.language.as_deref(), Some("Italian"));
}

#[test]
fn raw_word_reads_scalars_as_text() {
    let raw: RawWord = serde_json::from_value(json!({
        "word": "Abbiocco",
        "family": 7,
        "region": null,
        "disputed": true,
        "needs_citation": 0,
        "sources": ["a"],
    }))
    .expect("should deserialize raw word");

    assert_eq!(raw.family.as_deref(), Some("7"));
    assert_eq!(raw.region, None);
    assert_eq!(raw.disputed, Some(Flag::Bool(true)));
    assert_eq!(raw.needs_citation, Some(Flag::Text("0".to_string())));
    assert_eq!(raw.sources, None);
}

#[test]
fn missing_required_reports_blank_and_absent_fields() {
    let raw = RawWord {
        word: Some("Akihi".to_string()),
        language: Some("   ".to_string()),
        ..RawWord::default()
    };
    assert_eq!(raw.missing_required(), vec!["language", "definition"]);

    let complete = RawWord {
        word: Some("Akihi".to_string()),
        language: Some("Hawaiian".to_string()),
        definition: Some("To forget directions right after hearing them".to_string()),
        ..RawWord::default()
    };
    assert!(complete.missing_required().is_empty());
}
