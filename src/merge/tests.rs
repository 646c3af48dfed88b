use super::*;

fn existing(words: &[&str]) -> Vec<WordRecord> {
    words
        .iter()
        .map(|w| WordRecord {
            word: (*w).to_string(),
            embedding: Some(vec![0.1, 0.2]),
            ..WordRecord::default()
        })
        .collect()
}

fn candidate(word: &str, language: &str) -> RawWord {
    RawWord {
        word: Some(word.to_string()),
        language: Some(language.to_string()),
        definition: Some(format!("definition of {word}")),
        ..RawWord::default()
    }
}

#[test]
fn normalize_folds_case_and_whitespace() {
    assert_eq!(normalize_word("  Ikigai \n"), "ikigai");
    assert_eq!(normalize_word("HYGGE"), "hygge");
}

#[test]
fn normalize_keeps_diacritics_and_scripts() {
    assert_ne!(normalize_word("Arbejdsglæde"), normalize_word("Arbejdsglaede"));
    assert_ne!(normalize_word("生き甲斐"), normalize_word("ikigai"));
}

#[test]
fn duplicates_are_case_and_whitespace_insensitive() {
    let existing = existing(&["Ikigai", "Saudade"]);
    let candidates = vec![
        candidate(" ikigai ", "Japanese"),
        candidate("SAUDADE", "Portuguese"),
        candidate("Fernweh", "German"),
    ];

    let duplicates = find_duplicates(&existing, &candidates);
    assert_eq!(duplicates, vec![" ikigai ".to_string(), "SAUDADE".to_string()]);
}

#[test]
fn diacritic_variants_are_not_duplicates() {
    let existing = existing(&["Arbejdsglæde"]);
    let candidates = vec![
        candidate("Arbejdsglaede", "Danish"),
        candidate("ArbejdsglÃ¦de", "Danish"),
    ];

    assert!(find_duplicates(&existing, &candidates).is_empty());
}

#[test]
fn duplicate_reported_once_per_spelling() {
    let existing = existing(&["Hygge"]);
    let candidates = vec![candidate("hygge", "Danish"), candidate("hygge", "Danish")];

    assert_eq!(find_duplicates(&existing, &candidates), vec!["hygge".to_string()]);
}

#[test]
fn partition_preserves_candidate_order() {
    let existing = existing(&["Ikigai"]);
    let candidates = vec![
        candidate("Fernweh", "German"),
        candidate("ikigai", "Japanese"),
        candidate("Hygge", "Danish"),
    ];

    let partition = partition_candidates(&existing, &candidates);
    let fresh: Vec<&str> = partition.fresh.iter().map(|c| c.headword()).collect();
    let duplicates: Vec<&str> = partition.duplicates.iter().map(|c| c.headword()).collect();

    assert_eq!(fresh, vec!["Fernweh", "Hygge"]);
    assert_eq!(duplicates, vec!["ikigai"]);
}

#[test]
fn partition_rejects_collisions_within_candidates() {
    let candidates = vec![
        candidate("Tsundoku", "Japanese"),
        candidate("tsundoku ", "Japanese"),
    ];

    let partition = partition_candidates::<WordRecord>(&[], &candidates);
    assert_eq!(partition.fresh.len(), 1);
    assert_eq!(partition.duplicates.len(), 1);
    assert_eq!(partition.duplicates[0].headword(), "tsundoku ");
}

#[test]
fn merge_appends_new_words_after_existing() {
    let existing = existing(&["Ikigai"]);
    let original_len = existing.len();
    let candidates = vec![
        candidate("Fernweh", "German"),
        candidate("ikigai", "Japanese"),
        candidate("Hygge", "Danish"),
    ];

    let outcome = merge_words(existing, &candidates, &StandardizeOptions::default());

    assert_eq!(outcome.duplicates, vec!["ikigai".to_string()]);
    assert_eq!(outcome.added, vec!["Fernweh".to_string(), "Hygge".to_string()]);
    assert_eq!(outcome.records.len(), original_len + 2);

    let words: Vec<&str> = outcome.records.iter().map(|r| r.word.as_str()).collect();
    assert_eq!(words, vec!["Ikigai", "Fernweh", "Hygge"]);
}

#[test]
fn merge_keeps_existing_embeddings() {
    let existing = existing(&["Ikigai"]);
    let outcome = merge_words(
        existing,
        &[candidate("Hygge", "Danish")],
        &StandardizeOptions::default(),
    );

    assert_eq!(outcome.records[0].embedding, Some(vec![0.1, 0.2]));
    assert!(outcome.records[1].embedding.is_none());
    assert_eq!(outcome.records[1].language.as_deref(), Some("Danish"));
}

#[test]
fn merged_dataset_has_no_new_collisions() {
    let existing = existing(&["Ikigai", "Hygge"]);
    let candidates = vec![
        candidate("Fernweh", "German"),
        candidate("FERNWEH", "German"),
        candidate(" hygge", "Danish"),
        candidate("Sobremesa", "Spanish"),
    ];

    let outcome = merge_words(existing, &candidates, &StandardizeOptions::default());

    let mut seen = HashSet::new();
    for record in &outcome.records {
        assert!(
            seen.insert(normalize_word(&record.word)),
            "duplicate headword in merged dataset: {}",
            record.word
        );
    }
    assert_eq!(outcome.records.len(), 4);
}

#[test]
fn curated_words_have_required_fields() {
    let words = curated_words();
    assert_eq!(words.len(), 5);
    for word in &words {
        assert!(word.missing_required().is_empty(), "{:?}", word.word);
    }
    assert_eq!(words[0].headword(), "Abbiocco");
}
