#[cfg(test)]
mod tests;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Named dataset fields in the order records built in code are written.
pub const FIELD_ORDER: [&str; 19] = [
    "word",
    "native_script",
    "transliteration",
    "language",
    "family",
    "category",
    "definition",
    "literal",
    "usage_notes",
    "example_native",
    "example_gloss",
    "english_approx",
    "loanword_in_english",
    "disputed",
    "region",
    "closest_english_paraphrase",
    "sources",
    "needs_citation",
    "embedding",
];

/// A word entry as stored in the dataset file.
///
/// A record read from disk remembers its key order in `source_keys` and is
/// written back in that order. Keys the crate does not know about (front-end
/// additions such as `searchableText`) live in `extra`, as do named keys whose
/// value is `null` or not of the expected type, so loading and saving a
/// dataset never drops or rewrites data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordRecord {
    pub word: String,
    pub native_script: Option<String>,
    pub transliteration: Option<String>,
    pub language: Option<String>,
    pub family: Option<String>,
    pub category: Option<String>,
    pub definition: Option<String>,
    pub literal: Option<String>,
    pub usage_notes: Option<String>,
    pub example_native: Option<String>,
    pub example_gloss: Option<String>,
    pub english_approx: Option<String>,
    pub loanword_in_english: Option<Flag>,
    pub disputed: Option<Flag>,
    pub region: Option<String>,
    pub closest_english_paraphrase: Option<String>,
    pub sources: Option<String>,
    pub needs_citation: Option<Flag>,
    pub embedding: Option<Vec<f64>>,
    pub extra: Map<String, Value>,
    /// Key order as read from disk; `None` for records built in code.
    pub source_keys: Option<Vec<String>>,
}

/// A loosely-shaped candidate entry, e.g. a hand-curated word list.
///
/// Every field is optional, unknown keys are ignored and scalar values of any
/// JSON type are read as text; `standardize` turns it into a [`WordRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWord {
    #[serde(deserialize_with = "lenient_text")]
    pub word: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub native_script: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub transliteration: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub family: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub definition: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub literal: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub usage_notes: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub example_native: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub example_gloss: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub english_approx: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub loanword_in_english: Option<Flag>,
    #[serde(deserialize_with = "lenient_flag")]
    pub disputed: Option<Flag>,
    #[serde(deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub closest_english_paraphrase: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub sources: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub needs_citation: Option<Flag>,
}

/// Boolean-as-string flag. Keeps the exact text it was loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    #[inline]
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Flag::Bool(*b)),
            Value::String(s) => Some(Flag::Text(s.clone())),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Flag::Bool(b) => Value::Bool(*b),
            Flag::Text(s) => Value::String(s.clone()),
        }
    }
}

impl Default for Flag {
    #[inline]
    fn default() -> Self {
        Flag::Text("false".to_string())
    }
}

/// Anything that carries a headword that can be checked for duplicates.
pub trait Headword {
    fn headword(&self) -> &str;
}

impl Headword for WordRecord {
    #[inline]
    fn headword(&self) -> &str {
        &self.word
    }
}

impl Headword for RawWord {
    #[inline]
    fn headword(&self) -> &str {
        self.word.as_deref().unwrap_or_default()
    }
}

/// Fields a candidate must carry before it is worth merging.
pub const REQUIRED_FIELDS: [&str; 3] = ["word", "language", "definition"];

impl WordRecord {
    /// A record counts as embedded only when it holds a non-empty vector.
    #[inline]
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }

    #[inline]
    pub fn is_disputed(&self) -> bool {
        self.disputed.as_ref().is_some_and(Flag::is_set)
    }

    #[inline]
    pub fn is_loanword_in_english(&self) -> bool {
        self.loanword_in_english.as_ref().is_some_and(Flag::is_set)
    }

    #[inline]
    pub fn needs_citation(&self) -> bool {
        self.needs_citation.as_ref().is_some_and(Flag::is_set)
    }

    /// Name used in progress messages when the headword is blank.
    #[inline]
    pub fn display_word(&self) -> &str {
        if self.word.trim().is_empty() {
            "unknown"
        } else {
            &self.word
        }
    }

    /// Build a record from a JSON object, keeping its key order.
    #[inline]
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut record = Self {
            source_keys: Some(map.keys().cloned().collect()),
            ..Self::default()
        };

        for (key, value) in map {
            if !record.absorb(&key, &value) {
                record.extra.insert(key, value);
            }
        }

        record
    }

    /// The record as a JSON object: source key order first, then any named
    /// fields set since loading, then the remaining extra keys.
    #[inline]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        for key in self.source_keys.iter().flatten() {
            let value = self
                .named_value(key)
                .or_else(|| self.extra.get(key).cloned());
            if let Some(value) = value {
                map.insert(key.clone(), value);
            }
        }

        for key in FIELD_ORDER {
            if map.contains_key(key) {
                continue;
            }
            // A loaded record without a headword key stays without one
            if key == "word" && self.word.is_empty() && self.source_keys.is_some() {
                continue;
            }
            if let Some(value) = self.named_value(key) {
                map.insert(key.to_string(), value);
            }
        }

        for (key, value) in &self.extra {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }

        map
    }

    /// Store `value` in the named field `key` if it has the field's type.
    fn absorb(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "word" => match value {
                Value::String(s) => {
                    self.word.clone_from(s);
                    true
                }
                _ => false,
            },
            "loanword_in_english" | "disputed" | "needs_citation" => {
                let flag = Flag::from_value(value);
                let accepted = flag.is_some();
                if let Some(slot) = self.flag_slot(key) {
                    *slot = flag;
                }
                accepted
            }
            "embedding" => {
                let embedding = value
                    .as_array()
                    .and_then(|items| items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>());
                let accepted = embedding.is_some();
                self.embedding = embedding;
                accepted
            }
            _ => match (self.text_slot(key), value) {
                (Some(slot), Value::String(s)) => {
                    *slot = Some(s.clone());
                    true
                }
                _ => false,
            },
        }
    }

    fn named_value(&self, key: &str) -> Option<Value> {
        match key {
            "word" => {
                // An off-type headword kept in `extra` takes precedence
                if self.word.is_empty() && self.extra.contains_key("word") {
                    None
                } else {
                    Some(Value::String(self.word.clone()))
                }
            }
            "loanword_in_english" => self.loanword_in_english.as_ref().map(Flag::to_value),
            "disputed" => self.disputed.as_ref().map(Flag::to_value),
            "needs_citation" => self.needs_citation.as_ref().map(Flag::to_value),
            "embedding" => self.embedding.as_ref().map(|values| {
                Value::Array(
                    values
                        .iter()
                        .map(|v| Number::from_f64(*v).map_or(Value::Null, Value::Number))
                        .collect(),
                )
            }),
            _ => self
                .text_ref(key)
                .and_then(|text| text.clone().map(Value::String)),
        }
    }

    fn text_ref(&self, key: &str) -> Option<&Option<String>> {
        Some(match key {
            "native_script" => &self.native_script,
            "transliteration" => &self.transliteration,
            "language" => &self.language,
            "family" => &self.family,
            "category" => &self.category,
            "definition" => &self.definition,
            "literal" => &self.literal,
            "usage_notes" => &self.usage_notes,
            "example_native" => &self.example_native,
            "example_gloss" => &self.example_gloss,
            "english_approx" => &self.english_approx,
            "region" => &self.region,
            "closest_english_paraphrase" => &self.closest_english_paraphrase,
            "sources" => &self.sources,
            _ => return None,
        })
    }

    fn text_slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        Some(match key {
            "native_script" => &mut self.native_script,
            "transliteration" => &mut self.transliteration,
            "language" => &mut self.language,
            "family" => &mut self.family,
            "category" => &mut self.category,
            "definition" => &mut self.definition,
            "literal" => &mut self.literal,
            "usage_notes" => &mut self.usage_notes,
            "example_native" => &mut self.example_native,
            "example_gloss" => &mut self.example_gloss,
            "english_approx" => &mut self.english_approx,
            "region" => &mut self.region,
            "closest_english_paraphrase" => &mut self.closest_english_paraphrase,
            "sources" => &mut self.sources,
            _ => return None,
        })
    }

    fn flag_slot(&mut self, key: &str) -> Option<&mut Option<Flag>> {
        Some(match key {
            "loanword_in_english" => &mut self.loanword_in_english,
            "disputed" => &mut self.disputed,
            "needs_citation" => &mut self.needs_citation,
            _ => return None,
        })
    }
}

impl Serialize for WordRecord {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WordRecord {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}

impl RawWord {
    /// Required fields that are absent or blank, in declaration order.
    #[inline]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = [&self.word, &self.language, &self.definition];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Flag>, D::Error> {
    Ok(
        Option::<Value>::deserialize(deserializer)?.and_then(|value| match value {
            Value::Bool(b) => Some(Flag::Bool(b)),
            other => scalar_text(other).map(Flag::Text),
        }),
    )
}
