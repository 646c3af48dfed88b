use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::Config;
use crate::dataset::{
    embedded_output_path, load_candidates, load_dataset, load_existing_dataset,
    merged_output_path, save_dataset,
};
use crate::embeddings::{AnnotationEvent, EmbeddingAnnotator, OpenAiClient};
use crate::fetch::CsvFetcher;
use crate::merge::{StandardizeOptions, curated_words, merge_words};
use crate::selftest::run_self_test;

/// Download the published CSV and store it as JSON
#[inline]
pub fn fetch_words(config: &Config) -> Result<()> {
    let output = &config.dataset.csv_output;
    let fetcher = CsvFetcher::new(config.embedding.timeout());

    let summary = fetcher
        .fetch_and_convert(&config.dataset.csv_url, output)
        .context("Failed to import word list CSV")?;

    println!("Total words in dataset: {}", summary.rows);
    match &summary.sample {
        Some(sample) => println!(
            "Sample word: {}",
            serde_json::to_string(sample).context("Failed to render sample word")?
        ),
        None => println!("Sample word: No data"),
    }

    if summary.rows > 0 {
        println!("Available fields: {}", summary.columns.join(", "));
        println!("Number of languages: {}", summary.languages);
        println!("Number of categories: {}", summary.categories);
    }

    println!("Data processed and saved to {}", output.display());
    Ok(())
}

/// Merge curated candidate words into an existing dataset
#[inline]
pub fn merge_new_words(config: &Config, dataset: &Path, words: Option<&Path>) -> Result<()> {
    let existing = load_dataset(dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;
    println!("Loaded {} existing words", existing.len());

    let candidates = match words {
        Some(path) => load_candidates(path)
            .with_context(|| format!("Failed to load candidate words {}", path.display()))?,
        None => curated_words(),
    };

    let options = StandardizeOptions {
        default_source: config.dataset.curated_source.clone(),
    };
    let outcome = merge_words(existing, &candidates, &options);

    if !outcome.duplicates.is_empty() {
        println!(
            "Found {} duplicate words: {:?}",
            outcome.duplicates.len(),
            outcome.duplicates
        );
    }
    println!("Adding {} new words to dataset", outcome.added.len());

    let output = merged_output_path(dataset);
    save_dataset(&output, &outcome.records)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    println!("Updated dataset saved to: {}", output.display());
    println!("Total words: {}", outcome.records.len());
    println!();
    println!("Next steps:");
    println!("1. Run `words-prep embed {}` to add embeddings", output.display());
    println!("2. Replace the original file with the embedded version");

    Ok(())
}

/// Attach embeddings to every record of `input` that lacks one
#[inline]
pub fn annotate_embeddings(config: &Config, input: &Path, api_key: String) -> Result<()> {
    let output = embedded_output_path(input);

    println!("Input file: {}", input.display());
    println!("Output file: {}", output.display());

    let words = load_existing_dataset(input)
        .with_context(|| format!("Failed to load dataset {}", input.display()))?;
    println!("Loaded {} words from dataset", words.len());

    let existing = words.iter().filter(|w| w.has_embedding()).count();
    println!("Found {} existing embeddings", existing);

    if existing == words.len() {
        println!("All words already have embeddings!");
        return Ok(());
    }

    let client = OpenAiClient::new(&config.embedding, api_key)
        .context("Failed to create embedding client")?;
    info!(
        "Using model {} at {}",
        client.model(),
        client.endpoint().as_str()
    );
    let annotator = EmbeddingAnnotator::new(client, &config.embedding);

    let bar = if console::user_attended_stderr() {
        ProgressBar::new(words.len() as u64).with_style(
            ProgressStyle::with_template("{bar:40} [{pos}/{len}] {msg}")
                .expect("style template is valid"),
        )
    } else {
        ProgressBar::hidden()
    };

    println!("Processing {} words...", words.len());
    let report = annotator.annotate_all(words, |event| match event {
        AnnotationEvent::Skipped {
            position,
            total,
            word,
        } => {
            bar.suspend(|| {
                println!("[{position}/{total}] Skipping {word} - embedding exists");
            });
            bar.inc(1);
        }
        AnnotationEvent::Generating {
            position,
            total,
            word,
        } => {
            bar.suspend(|| {
                println!("[{position}/{total}] Generating embedding for: {word}");
            });
            bar.set_message(word.to_string());
            bar.inc(1);
        }
        AnnotationEvent::Failed { word, error, .. } => {
            bar.suspend(|| {
                println!(
                    "{} Error processing word '{word}': {error}",
                    style("✗").red()
                );
            });
        }
        AnnotationEvent::Pausing { processed, .. } => {
            bar.suspend(|| println!("Processed {processed} words, sleeping briefly..."));
        }
    });
    bar.finish_and_clear();

    save_dataset(&output, &report.records)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Dataset with embeddings saved to: {}", output.display());

    println!();
    println!("Summary:");
    println!("- Total words: {}", report.records.len());
    println!("- Words with embeddings: {}", report.with_embeddings());
    println!("- Success rate: {:.1}%", report.success_rate());

    if !report.failures.is_empty() {
        println!("- Failed words: {}", report.failures.len());
        for failure in &report.failures {
            println!("    {} (#{}): {}", failure.word, failure.index + 1, failure.error);
        }
    }

    Ok(())
}

/// Run the sanity checks and print their results.
///
/// Failing checks are reported, never turned into an error.
#[inline]
pub fn self_test(config: &Config) {
    println!("{}", style("🧪 Running setup tests...").bold());
    println!();

    let options = StandardizeOptions {
        default_source: config.dataset.curated_source.clone(),
    };
    let report = run_self_test(&curated_words(), &config.dataset.reference_path, &options);

    for result in &report.results {
        println!("Testing {}...", result.name);
        if result.passed {
            println!("{} {}", style("✅").green(), result.message);
        } else {
            println!("{} {}", style("❌").red(), result.message);
        }
        println!();
    }

    println!(
        "📊 Test Results: {} passed, {} failed",
        report.passed(),
        report.failed()
    );

    if report.all_passed() {
        println!("{}", style("🎉 All tests passed! Setup is ready.").green());
        println!();
        println!("📋 Next steps:");
        println!(
            "1. Set the {} environment variable",
            config.embedding.api_key_env
        );
        println!(
            "2. Run: words-prep merge {}",
            config.dataset.reference_path.display()
        );
        println!(
            "3. Run: words-prep embed {}",
            merged_output_path(&config.dataset.reference_path).display()
        );
    } else {
        println!(
            "{}",
            style("❌ Some tests failed. Please fix issues before proceeding.").red()
        );
    }
}
