// Merge module
// Adds curated candidate words to an existing dataset without introducing duplicates

pub mod curated;
pub mod standardize;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::dataset::{Headword, RawWord, WordRecord};

pub use curated::curated_words;
pub use standardize::{DEFAULT_CURATED_SOURCE, StandardizeOptions, standardize};

/// Normalize a headword for duplicate comparison.
///
/// Only surrounding whitespace and ASCII case are folded; words that differ by
/// diacritics or script stay distinct.
#[inline]
pub fn normalize_word(word: &str) -> String {
    word.trim().to_ascii_lowercase()
}

/// Headwords of `candidates` that already exist in `existing`.
///
/// Each duplicate is reported once, spelled as the candidate spells it, in
/// candidate order.
#[inline]
pub fn find_duplicates<E: Headword, C: Headword>(existing: &[E], candidates: &[C]) -> Vec<String> {
    let existing_normalized = normalized_set(existing);

    let mut duplicates: Vec<String> = Vec::new();
    for candidate in candidates {
        let word = candidate.headword();
        if existing_normalized.contains(&normalize_word(word))
            && !duplicates.iter().any(|d| d == word)
        {
            duplicates.push(word.to_string());
        }
    }
    duplicates
}

/// Candidates split into those that can be added and those that collide.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a> {
    pub fresh: Vec<&'a RawWord>,
    pub duplicates: Vec<&'a RawWord>,
}

/// Split candidates into new words and duplicates, preserving order.
///
/// A candidate also counts as a duplicate when it collides with an earlier
/// candidate that was accepted, so a merge never adds two records with the
/// same normalized headword.
#[inline]
pub fn partition_candidates<'a, E: Headword>(
    existing: &[E],
    candidates: &'a [RawWord],
) -> Partition<'a> {
    let mut seen = normalized_set(existing);
    let mut partition = Partition {
        fresh: Vec::new(),
        duplicates: Vec::new(),
    };

    for candidate in candidates {
        if seen.insert(normalize_word(candidate.headword())) {
            partition.fresh.push(candidate);
        } else {
            debug!("Skipping duplicate candidate: {}", candidate.headword());
            partition.duplicates.push(candidate);
        }
    }

    partition
}

/// Result of merging candidates into a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Existing records followed by the standardized new ones
    pub records: Vec<WordRecord>,
    /// Headwords that were appended
    pub added: Vec<String>,
    /// Candidate headwords that were skipped as duplicates
    pub duplicates: Vec<String>,
}

/// Append the non-duplicate candidates, standardized, after the existing
/// records. Existing records, embeddings included, are kept untouched.
#[inline]
pub fn merge_words(
    existing: Vec<WordRecord>,
    candidates: &[RawWord],
    options: &StandardizeOptions,
) -> MergeOutcome {
    let partition = partition_candidates(&existing, candidates);

    let new_records: Vec<WordRecord> = partition
        .fresh
        .iter()
        .map(|raw| standardize(raw, options))
        .collect();
    let added = new_records.iter().map(|r| r.word.clone()).collect();
    let duplicates = partition
        .duplicates
        .iter()
        .map(|raw| raw.headword().to_string())
        .collect();

    let mut records = existing;
    records.extend(new_records);

    info!(
        "Merged {} candidates: {} added, {} duplicates",
        candidates.len(),
        partition.fresh.len(),
        partition.duplicates.len()
    );

    MergeOutcome {
        records,
        added,
        duplicates,
    }
}

fn normalized_set<E: Headword>(records: &[E]) -> HashSet<String> {
    records
        .iter()
        .map(|record| normalize_word(record.headword()))
        .collect()
}
