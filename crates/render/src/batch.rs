//! Batch rendering of many independent messages in parallel.

use crate::renderer::markup::{Lookups, Props, RenderOutput, render_markup};
use chatmark_core::MarkupParser;
use rayon::prelude::*;
use std::time::Instant;

/// Input for batch processing - one message to render.
#[derive(Debug, Clone)]
pub struct BatchInput<'a> {
    /// Caller-chosen identifier (typically the message ID).
    pub id: String,
    /// Text and rendering context of the message.
    pub props: Props<'a>,
}

/// Result for a single message in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Render output (present on success).
    pub result: Option<RenderOutput>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Total number of messages processed.
    pub total: usize,
    /// Number of successful renders.
    pub succeeded: usize,
    /// Number of failed renders.
    pub failed: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
}

/// Results in input order plus statistics.
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Individual results for each input.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders every input in parallel.
///
/// Each message gets its own render context; a failing message never
/// affects the others.
pub fn render_batch<P>(
    inputs: &[BatchInput<'_>],
    parser: &P,
    lookups: &Lookups<'_>,
    options: &BatchOptions,
) -> BatchProcessingResult
where
    P: MarkupParser + ?Sized,
{
    let started = Instant::now();
    let run = || -> Vec<BatchResult> {
        inputs
            .par_iter()
            .map(|input| match render_markup(&input.props, parser, lookups) {
                Ok(output) => BatchResult {
                    id: input.id.clone(),
                    result: Some(output),
                    error: None,
                },
                Err(err) => BatchResult {
                    id: input.id.clone(),
                    result: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    };

    let results = match options.max_threads {
        Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(run),
            Err(err) => {
                log::warn!("Falling back to the global thread pool: {}", err);
                run()
            }
        },
        None => run(),
    };

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let stats = BatchStats {
        total: results.len(),
        succeeded: results.len() - failed,
        failed,
        processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    };
    BatchProcessingResult { results, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_core::{Entity, MarkupError, MemoryStore, PlainTextParser, RenderConfig, TwemojiCodec};

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let store = MemoryStore::new();
        let config = RenderConfig::default();
        let codec = TwemojiCodec::from_config(&config);
        let lookups = Lookups::from_store(&store, &codec, &config);
        let parser = |text: &str| -> Result<Entity, MarkupError> {
            if text == "boom" {
                Err(MarkupError::parse_error("rejected", 1, 1))
            } else {
                PlainTextParser.parse(text)
            }
        };

        let texts = ["one", "boom", "three", "  "];
        let inputs: Vec<BatchInput> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| BatchInput {
                id: i.to_string(),
                props: Props::new(text),
            })
            .collect();

        let batch = render_batch(
            &inputs,
            &parser,
            &lookups,
            &BatchOptions {
                max_threads: Some(2),
            },
        );

        let ids: Vec<&str> = batch.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3"]);
        assert_eq!(batch.stats.total, 4);
        assert_eq!(batch.stats.failed, 1);
        assert_eq!(batch.stats.succeeded, 3);
        assert!(batch.results[1].error.as_deref().is_some_and(|e| e.contains("rejected")));
        assert_eq!(batch.results[2].result.as_ref().map(|o| o.text_count), Some(5));
        // Whitespace-only text counts nothing, so it qualifies as large emoji.
        assert_eq!(batch.results[3].result.as_ref().map(|o| o.large_emoji), Some(true));
    }
}
