
use crate::dataset::{Flag, RawWord, WordRecord};

/// Source URL credited to hand-curated words that carry none of their own.
pub const DEFAULT_CURATED_SOURCE: &str =
    "https://www.theintrepidguide.com/untranslatable-words-ultimate-list/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizeOptions {
    /// Value for `sources` when the candidate has none
    pub default_source: String,
}

impl Default for StandardizeOptions {
    #[inline]
    fn default() -> Self {
        Self {
            default_source: DEFAULT_CURATED_SOURCE.to_string(),
        }
    }
}

/// Map a candidate onto the dataset schema.
///
/// This is the only place field defaults are decided. Every named field of
/// the result is populated: strings default to empty, flags to `"false"`,
/// `native_script` to the headword, `closest_english_paraphrase` to the
/// definition and `sources` to the configured curated source. The embedding
/// is left unset.
#[inline]
pub fn standardize(raw: &RawWord, options: &StandardizeOptions) -> WordRecord {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();
    let flag = |field: &Option<Flag>| Some(field.clone().unwrap_or_default());

    let word = text(&raw.word);
    let definition = text(&raw.definition);
    let native_script = raw.native_script.clone().unwrap_or_else(|| word.clone());
    let closest_english_paraphrase = raw
        .closest_english_paraphrase
        .clone()
        .unwrap_or_else(|| definition.clone());
    let sources = raw
        .sources
        .clone()
        .unwrap_or_else(|| options.default_source.clone());

    WordRecord {
        word,
        native_script: Some(native_script),
        transliteration: Some(text(&raw.transliteration)),
        language: Some(text(&raw.language)),
        family: Some(text(&raw.family)),
        category: Some(text(&raw.category)),
        definition: Some(definition),
        literal: Some(text(&raw.literal)),
        usage_notes: Some(text(&raw.usage_notes)),
        example_native: Some(text(&raw.example_native)),
        example_gloss: Some(text(&raw.example_gloss)),
        english_approx: Some(text(&raw.english_approx)),
        loanword_in_english: flag(&raw.loanword_in_english),
        disputed: flag(&raw.disputed),
        region: Some(text(&raw.region)),
        closest_english_paraphrase: Some(closest_english_paraphrase),
        sources: Some(sources),
        needs_citation: flag(&raw.needs_citation),
        embedding: None,
        extra: serde_json::Map::new(),
        source_keys: None,
    }
}
