// Embeddings module
// Provider client, retry policy and the dataset annotator built on top of them

pub mod annotator;
pub mod openai;
pub mod retry;

use thiserror::Error;

pub use annotator::{
    AnnotateOutcome, AnnotationEvent, AnnotationReport, EmbeddingAnnotator, FailedRecord,
    embedding_text,
};
pub use openai::OpenAiClient;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Timeouts, rate limiting, 5xx responses and dropped connections
    #[error("Transient provider failure: {0}")]
    Transient(String),
    #[error("Request rejected by provider: HTTP {status}")]
    Rejected { status: u16 },
    #[error("Request could not be sent: {0}")]
    Request(String),
    #[error("Invalid provider response: {0}")]
    Malformed(String),
    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<ProviderError>,
    },
}

impl ProviderError {
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Transient(_))
    }
}

/// A service that turns text into an embedding vector.
pub trait EmbeddingProvider {
    /// Make a single attempt; retrying is the caller's business.
    fn embed(&self, text: &str) -> Result<Vec<f64>, ProviderError>;
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for &P {
    #[inline]
    fn embed(&self, text: &str) -> Result<Vec<f64>, ProviderError> {
        (**self).embed(text)
    }
}
