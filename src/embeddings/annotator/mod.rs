
use std::time::Duration;

use tracing::{debug, info, warn};

use super::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use super::{EmbeddingProvider, ProviderError};
use crate::config::EmbeddingConfig;
use crate::dataset::WordRecord;

pub const FIELD_SEPARATOR: &str = " | ";

/// Build the text sent to the embedding provider.
///
/// Fields appear in a fixed order as `Label: value`, joined by `" | "`; blank
/// or absent fields are left out.
#[inline]
pub fn embedding_text(record: &WordRecord) -> String {
    let fields = [
        ("Word", Some(record.word.as_str())),
        ("Pronunciation", record.transliteration.as_deref()),
        ("Language", record.language.as_deref()),
        ("Region", record.region.as_deref()),
        ("Definition", record.definition.as_deref()),
        ("Literal meaning", record.literal.as_deref()),
        (
            "English equivalent",
            record.closest_english_paraphrase.as_deref(),
        ),
        ("Category", record.category.as_deref()),
        ("Usage", record.usage_notes.as_deref()),
        ("Example", record.example_gloss.as_deref()),
    ];

    fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("{label}: {v}"))
        })
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotateOutcome {
    /// The record already carried an embedding
    Skipped,
    Embedded,
}

/// Progress notifications emitted while annotating a dataset.
///
/// `position` is 1-based.
#[derive(Debug)]
pub enum AnnotationEvent<'a> {
    Skipped {
        position: usize,
        total: usize,
        word: &'a str,
    },
    Generating {
        position: usize,
        total: usize,
        word: &'a str,
    },
    Failed {
        position: usize,
        total: usize,
        word: &'a str,
        error: &'a ProviderError,
    },
    Pausing {
        processed: usize,
        pause: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecord {
    /// 0-based index into the dataset
    pub index: usize,
    pub word: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationReport {
    /// Every input record, in input order
    pub records: Vec<WordRecord>,
    pub embedded: usize,
    pub skipped: usize,
    pub failures: Vec<FailedRecord>,
}

impl AnnotationReport {
    #[inline]
    pub fn with_embeddings(&self) -> usize {
        self.records.iter().filter(|r| r.has_embedding()).count()
    }

    /// Percentage of records that end up with an embedding.
    #[inline]
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.with_embeddings() as f64 / self.records.len() as f64 * 100.0
    }
}

/// Attaches embeddings to records that lack one.
pub struct EmbeddingAnnotator<P, S = ThreadSleeper> {
    provider: P,
    sleeper: S,
    retry: RetryPolicy,
    batch_size: usize,
    batch_pause: Duration,
}

impl<P: EmbeddingProvider> EmbeddingAnnotator<P> {
    #[inline]
    pub fn new(provider: P, config: &EmbeddingConfig) -> Self {
        Self {
            provider,
            sleeper: ThreadSleeper,
            retry: config.retry_policy(),
            batch_size: (config.batch_size as usize).max(1),
            batch_pause: config.batch_pause(),
        }
    }
}

impl<P: EmbeddingProvider, S: Sleeper> EmbeddingAnnotator<P, S> {
    #[inline]
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> EmbeddingAnnotator<P, T> {
        EmbeddingAnnotator {
            provider: self.provider,
            sleeper,
            retry: self.retry,
            batch_size: self.batch_size,
            batch_pause: self.batch_pause,
        }
    }

    #[inline]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Pause for `pause` after every `batch_size` provider calls.
    #[inline]
    pub fn with_rate_limit(mut self, batch_size: usize, pause: Duration) -> Self {
        self.batch_size = batch_size.max(1);
        self.batch_pause = pause;
        self
    }

    /// Embed a single record in place.
    ///
    /// Records that already hold a non-empty embedding are left alone and the
    /// provider is not called.
    #[inline]
    pub fn annotate(&self, record: &mut WordRecord) -> Result<AnnotateOutcome, ProviderError> {
        if record.has_embedding() {
            return Ok(AnnotateOutcome::Skipped);
        }

        let text = embedding_text(record);
        debug!("Embedding text for {}: {}", record.display_word(), text);

        let embedding = self
            .retry
            .run(&self.sleeper, |_| self.provider.embed(&text))?;
        record.embedding = Some(embedding);

        Ok(AnnotateOutcome::Embedded)
    }

    /// Embed every record that needs it.
    ///
    /// A record whose request ultimately fails is kept as it was and listed in
    /// the report's failures; nothing is dropped and the batch carries on.
    #[inline]
    pub fn annotate_all<F>(&self, records: Vec<WordRecord>, mut on_event: F) -> AnnotationReport
    where
        F: FnMut(AnnotationEvent<'_>),
    {
        let total = records.len();
        let mut report = AnnotationReport {
            records: Vec::with_capacity(total),
            embedded: 0,
            skipped: 0,
            failures: Vec::new(),
        };
        let mut provider_calls = 0;

        info!("Annotating {} records", total);

        for (index, mut record) in records.into_iter().enumerate() {
            let position = index + 1;

            if record.has_embedding() {
                on_event(AnnotationEvent::Skipped {
                    position,
                    total,
                    word: record.display_word(),
                });
                report.skipped += 1;
                report.records.push(record);
                continue;
            }

            on_event(AnnotationEvent::Generating {
                position,
                total,
                word: record.display_word(),
            });
            provider_calls += 1;

            match self.annotate(&mut record) {
                Ok(AnnotateOutcome::Embedded) => report.embedded += 1,
                Ok(AnnotateOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    warn!("Error processing word '{}': {}", record.display_word(), e);
                    on_event(AnnotationEvent::Failed {
                        position,
                        total,
                        word: record.display_word(),
                        error: &e,
                    });
                    report.failures.push(FailedRecord {
                        index,
                        word: record.word.clone(),
                        error: e.to_string(),
                    });
                }
            }
            report.records.push(record);

            if provider_calls % self.batch_size == 0 && position < total {
                on_event(AnnotationEvent::Pausing {
                    processed: position,
                    pause: self.batch_pause,
                });
                self.sleeper.sleep(self.batch_pause);
            }
        }

        info!(
            "Annotation finished: {} embedded, {} skipped, {} failed",
            report.embedded,
            report.skipped,
            report.failures.len()
        );

        report
    }
}
