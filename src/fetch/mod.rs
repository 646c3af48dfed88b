// Fetch module
// One-time import of the published CSV word list into the JSON dataset format


use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::dataset::{WordRecord, save_dataset};
use crate::{PrepError, Result};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Records parsed from the CSV together with its header row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDataset {
    pub columns: Vec<String>,
    pub records: Vec<WordRecord>,
}

/// Counts reported after an import.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    /// First record, shown as a sample
    pub sample: Option<WordRecord>,
    /// Distinct non-empty languages
    pub languages: usize,
    /// Distinct non-empty categories
    pub categories: usize,
}

/// Parse CSV text whose header row names record fields.
///
/// Short rows are accepted; their missing columns are simply absent from the
/// record. Columns that are not record fields are kept as extra fields.
#[inline]
pub fn parse_csv<R: Read>(reader: R) -> Result<CsvDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;

        let fields: Map<String, Value> = columns
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.clone(), Value::String(value.to_string())))
            .collect();

        records.push(WordRecord::from_map(fields));
    }

    debug!("Parsed {} CSV rows with {} columns", records.len(), columns.len());
    Ok(CsvDataset { columns, records })
}

#[inline]
pub fn summarize(dataset: &CsvDataset) -> CsvSummary {
    let distinct = |field: fn(&WordRecord) -> Option<&str>| {
        dataset
            .records
            .iter()
            .filter_map(field)
            .filter(|v| !v.is_empty())
            .collect::<HashSet<_>>()
            .len()
    };

    CsvSummary {
        rows: dataset.records.len(),
        columns: dataset.columns.clone(),
        sample: dataset.records.first().cloned(),
        languages: distinct(|r| r.language.as_deref()),
        categories: distinct(|r| r.category.as_deref()),
    }
}

/// Downloads the published CSV.
#[derive(Debug, Clone)]
pub struct CsvFetcher {
    agent: ureq::Agent,
}

impl Default for CsvFetcher {
    #[inline]
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl CsvFetcher {
    #[inline]
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build()
                .into(),
        }
    }

    #[inline]
    pub fn fetch(&self, url: &str) -> Result<CsvDataset> {
        info!("Fetching CSV from {}", url);

        let body = self
            .agent
            .get(url)
            .header("Accept", "text/csv,text/plain,*/*")
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| PrepError::Network(format!("Failed to fetch {url}: {e}")))?;

        parse_csv(body.as_bytes())
    }

    /// Fetch the CSV, write it to `output` as JSON and return its summary.
    #[inline]
    pub fn fetch_and_convert(&self, url: &str, output: &Path) -> Result<CsvSummary> {
        let dataset = self.fetch(url)?;
        save_dataset(output, &dataset.records)?;
        Ok(summarize(&dataset))
    }
}
