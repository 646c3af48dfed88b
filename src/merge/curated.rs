use crate::dataset::RawWord;

fn entry(word: &str, language: &str, definition: &str, region: &str, category: &str) -> RawWord {
    RawWord {
        word: Some(word.to_string()),
        language: Some(language.to_string()),
        definition: Some(definition.to_string()),
        region: Some(region.to_string()),
        category: Some(category.to_string()),
        ..RawWord::default()
    }
}

/// Words transcribed by hand from The Intrepid Guide's list of untranslatable
/// words. Spellings are kept exactly as they were extracted, including the
/// mis-decoded `ArbejdsglÃ¦de`.
#[inline]
pub fn curated_words() -> Vec<RawWord> {
    vec![
        entry(
            "Abbiocco",
            "Italian",
            "The drowsiness that comes after a big meal",
            "Italy",
            "food/emotion",
        ),
        entry(
            "Age-otori",
            "Japanese",
            "To look worse after a haircut",
            "Japan",
            "appearance",
        ),
        entry(
            "Akihi",
            "Hawaiian",
            "To get driving directions, walk away, and immediately forget them",
            "Hawaii",
            "memory/behavior",
        ),
        entry(
            "Apapachar",
            "Spanish",
            "To tenderly hug with one's soul",
            "Mexico",
            "affection",
        ),
        entry(
            "ArbejdsglÃ¦de",
            "Danish",
            "The joy and satisfaction derived from work",
            "Denmark",
            "work/emotion",
        ),
    ]
}
