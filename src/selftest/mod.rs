// Self-test module
// Sanity checks over the curated sample data and an on-disk reference dataset


use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::dataset::{Headword, RawWord, REQUIRED_FIELDS, WordRecord};
use crate::embeddings::embedding_text;
use crate::merge::{StandardizeOptions, find_duplicates, standardize};

/// Fields the first record of the reference dataset must carry.
const REFERENCE_FIELDS: [&str; 4] = ["word", "language", "definition", "embedding"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(name: &'static str, message: String) -> Self {
        Self {
            name,
            passed: true,
            message,
        }
    }

    fn fail(name: &'static str, message: String) -> Self {
        Self {
            name,
            passed: false,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelfTestReport {
    pub results: Vec<CheckResult>,
}

impl SelfTestReport {
    #[inline]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    #[inline]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    #[inline]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Run every check against the given samples and reference dataset.
#[inline]
pub fn run_self_test(
    samples: &[RawWord],
    reference: &Path,
    options: &StandardizeOptions,
) -> SelfTestReport {
    let results = vec![
        check_data_structure(samples),
        check_standardization(samples, options),
        check_duplicate_detection(samples),
        check_embedding_text(samples, options),
        check_reference_dataset(reference),
    ];

    debug!(
        "Self-test finished: {} of {} checks passed",
        results.iter().filter(|r| r.passed).count(),
        results.len()
    );

    SelfTestReport { results }
}

#[inline]
pub fn check_data_structure(samples: &[RawWord]) -> CheckResult {
    const NAME: &str = "data structure";

    for (i, sample) in samples.iter().enumerate() {
        if let Some(field) = sample.missing_required().first() {
            return CheckResult::fail(NAME, format!("Word {i}: Missing required field '{field}'"));
        }
    }

    CheckResult::pass(
        NAME,
        format!(
            "All {} sample words have required fields ({})",
            samples.len(),
            REQUIRED_FIELDS.join(", ")
        ),
    )
}

#[inline]
pub fn check_standardization(samples: &[RawWord], options: &StandardizeOptions) -> CheckResult {
    const NAME: &str = "standardization";

    let Some(sample) = samples.first() else {
        return CheckResult::fail(NAME, "No sample data to test".to_string());
    };

    let standardized = standardize(sample, options);
    let fields = [
        ("word", Some(standardized.word.as_str())),
        ("language", standardized.language.as_deref()),
        ("definition", standardized.definition.as_deref()),
        ("sources", standardized.sources.as_deref()),
    ];

    if let Some((field, _)) = fields
        .iter()
        .find(|(_, value)| value.is_none_or(str::is_empty))
    {
        return CheckResult::fail(NAME, format!("Standardized word missing field: {field}"));
    }

    CheckResult::pass(
        NAME,
        format!("Word standardization working: {}", standardized.word),
    )
}

#[inline]
pub fn check_duplicate_detection(samples: &[RawWord]) -> CheckResult {
    const NAME: &str = "duplicate detection";

    let Some(first) = samples.first() else {
        return CheckResult::fail(NAME, "No sample data to test".to_string());
    };

    let existing = [WordRecord {
        word: first.headword().to_lowercase(),
        ..WordRecord::default()
    }];
    let duplicates = find_duplicates(&existing, samples);

    match duplicates.as_slice() {
        [duplicate] => CheckResult::pass(
            NAME,
            format!("Duplicate detection working: found '{duplicate}'"),
        ),
        _ => CheckResult::fail(
            NAME,
            format!("Expected 1 duplicate, found {}", duplicates.len()),
        ),
    }
}

#[inline]
pub fn check_embedding_text(samples: &[RawWord], options: &StandardizeOptions) -> CheckResult {
    const NAME: &str = "embedding text";

    let Some(sample) = samples.first() else {
        return CheckResult::fail(NAME, "No sample data to test".to_string());
    };

    let text = embedding_text(&standardize(sample, options));
    if text.starts_with("Word: ") {
        CheckResult::pass(
            NAME,
            format!("Embedding text prepared ({} characters)", text.chars().count()),
        )
    } else {
        CheckResult::fail(NAME, format!("Unexpected embedding text: {text:?}"))
    }
}

#[inline]
pub fn check_reference_dataset(path: &Path) -> CheckResult {
    const NAME: &str = "existing dataset format";

    if !path.exists() {
        return CheckResult::fail(NAME, format!("Dataset not found: {}", path.display()));
    }

    let data: Value = match fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from))
    {
        Ok(data) => data,
        Err(e) => return CheckResult::fail(NAME, format!("Error reading dataset: {e}")),
    };

    let Some(words) = data.as_array() else {
        return CheckResult::fail(NAME, "Dataset should be a list".to_string());
    };

    let Some(first) = words.first() else {
        return CheckResult::fail(NAME, "Dataset is empty".to_string());
    };

    if let Some(field) = REFERENCE_FIELDS
        .iter()
        .find(|field| first.get(**field).is_none())
    {
        return CheckResult::fail(NAME, format!("Missing field in existing data: {field}"));
    }

    CheckResult::pass(
        NAME,
        format!("Existing dataset format compatible ({} words)", words.len()),
    )
}
