/*!
 * Chunk-level translation pipeline.
 *
 * Translates a document's text one chunk at a time against a pluggable
 * backend. Each chunk gets a bounded number of attempts; a chunk that still
 * fails is replaced by a fixed placeholder so one bad section never sinks the
 * whole document. Results are reassembled in input order.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::app_config::TranslationCommonConfig;
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::TranslationBackend;

use super::chunker::{Chunker, PARAGRAPH_DELIMITER};
use super::pacing::Pacer;

/// Placeholder used for a chunk whose attempts were all exhausted
pub const SENTINEL: &str = "[Translation unavailable for this section]";

/// Receives progress updates from a running translation; purely observational
pub trait ProgressReporter: Send + Sync {
    /// Called after each chunk completes, translated or substituted
    fn on_progress(&self, completed: usize, total: usize);

    /// Human-readable status line
    fn on_status(&self, status: &str);
}

/// Progress reporter that ignores all updates
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn on_progress(&self, _completed: usize, _total: usize) {}

    fn on_status(&self, _status: &str) {}
}

/// Result of a translation run with per-run statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// Reassembled translated text
    pub text: String,
    /// Number of chunks the input was split into
    pub total_chunks: usize,
    /// Indices of chunks that received the placeholder
    pub failed_chunks: Vec<usize>,
    /// Backend requests issued, retries included
    pub backend_calls: usize,
}

impl TranslationOutcome {
    fn empty() -> Self {
        Self {
            text: String::new(),
            total_chunks: 0,
            failed_chunks: Vec::new(),
            backend_calls: 0,
        }
    }

    /// True when every chunk was translated by the backend
    pub fn is_complete(&self) -> bool {
        self.failed_chunks.is_empty()
    }
}

// Result of all attempts for one chunk
struct ChunkAttempts {
    translated: Option<String>,
    calls: usize,
}

/// Sequential chunk translator with retry and pacing
#[derive(Debug)]
pub struct TranslationPipeline {
    chunker: Chunker,
    max_retries: u32,
    pacer: Box<dyn Pacer>,
    cancel: Option<Arc<AtomicBool>>,
}

impl TranslationPipeline {
    /// Create a pipeline; `max_retries` is the number of attempts per chunk
    pub fn new(chunker: Chunker, max_retries: u32, pacer: Box<dyn Pacer>) -> Result<Self, TranslationError> {
        if max_retries == 0 {
            return Err(TranslationError::Config("max_retries must be at least 1".to_string()));
        }
        Ok(Self {
            chunker,
            max_retries,
            pacer,
            cancel: None,
        })
    }

    /// Create a pipeline from the common translation settings
    pub fn from_config(common: &TranslationCommonConfig) -> Result<Self, TranslationError> {
        let chunker = Chunker::new(common.max_chunk_size)?;
        Self::new(chunker, common.max_retries, common.pacing.build())
    }

    /// Stop between chunks once `flag` is set
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Shrink chunks to fit a backend that caps the request length
    pub fn with_request_limit(mut self, limit: Option<usize>) -> Result<Self, TranslationError> {
        if let Some(limit) = limit.filter(|&l| l < self.chunker.max_size()) {
            debug!("Limiting chunks to {} characters (was {})", limit, self.chunker.max_size());
            self.chunker = Chunker::new(limit)?;
        }
        Ok(self)
    }

    /// Maximum characters per backend request
    pub fn max_chunk_size(&self) -> usize {
        self.chunker.max_size()
    }

    /// Translate `text` and return the reassembled translation
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
        backend: &dyn TranslationBackend,
        progress: &dyn ProgressReporter,
    ) -> Result<String, TranslationError> {
        let outcome = self
            .translate_detailed(text, target_language, source_language, backend, progress)
            .await?;
        Ok(outcome.text)
    }

    /// Translate `text`, also reporting chunk and call statistics
    pub async fn translate_detailed(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
        backend: &dyn TranslationBackend,
        progress: &dyn ProgressReporter,
    ) -> Result<TranslationOutcome, TranslationError> {
        if text.trim().is_empty() {
            return Ok(TranslationOutcome::empty());
        }

        let (source_language, target_language) = Self::validate_languages(source_language, target_language)?;

        let char_count = text.chars().count();
        if char_count <= self.chunker.max_size() {
            if self.is_cancelled() {
                return Err(TranslationError::Cancelled { completed: 0, total: 1 });
            }

            debug!("Input fits in one request ({} characters)", char_count);
            progress.on_status("Translating...");
            tokio::time::sleep(self.pacer.initial_delay()).await;

            let attempts = self
                .translate_chunk(text, 0, 1, source_language, target_language, backend, progress, false)
                .await;
            progress.on_progress(1, 1);

            let failed_chunks = if attempts.translated.is_some() { Vec::new() } else { vec![0] };
            return Ok(TranslationOutcome {
                text: attempts.translated.unwrap_or_else(|| SENTINEL.to_string()),
                total_chunks: 1,
                failed_chunks,
                backend_calls: attempts.calls,
            });
        }

        let chunks = self.chunker.split(text);
        let total = chunks.len();
        info!(
            "Translating {} characters in {} chunks with {} ({} -> {})",
            char_count, total, backend.name(), source_language, target_language
        );

        let mut translated: Vec<String> = Vec::with_capacity(total);
        let mut failed_chunks = Vec::new();
        let mut backend_calls = 0;

        for chunk in &chunks {
            if self.is_cancelled() {
                return Err(TranslationError::Cancelled {
                    completed: chunk.index,
                    total,
                });
            }

            progress.on_status(&format!("Translating chunk {} of {}...", chunk.index + 1, total));

            if chunk.content.trim().is_empty() {
                translated.push(chunk.content.clone());
            } else {
                let attempts = self
                    .translate_chunk(&chunk.content, chunk.index, total, source_language, target_language, backend, progress, true)
                    .await;
                backend_calls += attempts.calls;

                match attempts.translated {
                    Some(text) => translated.push(text),
                    None => {
                        failed_chunks.push(chunk.index);
                        translated.push(SENTINEL.to_string());
                    }
                }
            }

            progress.on_progress(chunk.index + 1, total);
        }

        if !failed_chunks.is_empty() {
            warn!("{} of {} chunks could not be translated", failed_chunks.len(), total);
        }

        Ok(TranslationOutcome {
            text: translated.join(PARAGRAPH_DELIMITER),
            total_chunks: total,
            failed_chunks,
            backend_calls,
        })
    }

    // Returns the canonical spelling of both codes
    fn validate_languages(
        source_language: &str,
        target_language: &str,
    ) -> Result<(&'static str, &'static str), TranslationError> {
        let source = language_utils::find_by_code(source_language)
            .ok_or_else(|| TranslationError::InvalidLanguage {
                role: "source",
                code: source_language.to_string(),
            })?;
        let target = language_utils::find_by_code(target_language)
            .filter(|l| l.code != language_utils::AUTO_DETECT)
            .ok_or_else(|| TranslationError::InvalidLanguage {
                role: "target",
                code: target_language.to_string(),
            })?;
        Ok((source.code, target.code))
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    #[allow(clippy::too_many_arguments)]
    async fn translate_chunk(
        &self,
        text: &str,
        index: usize,
        total: usize,
        source_language: &str,
        target_language: &str,
        backend: &dyn TranslationBackend,
        progress: &dyn ProgressReporter,
        pace_after_success: bool,
    ) -> ChunkAttempts {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match backend.translate(text, source_language, target_language).await {
                Ok(translated) => {
                    debug!("Chunk {}/{} translated on attempt {}", index + 1, total, attempt);
                    if pace_after_success {
                        Self::pause(self.pacer.delay_after_success(index)).await;
                    }
                    return ChunkAttempts {
                        translated: Some(translated),
                        calls: attempt as usize,
                    };
                }
                Err(e) if attempt < self.max_retries => {
                    warn!(
                        "Chunk {}/{} failed (attempt {}/{}): {}",
                        index + 1, total, attempt, self.max_retries, e
                    );
                    progress.on_status(&format!("Retrying chunk {}... (attempt {})", index + 1, attempt + 1));
                    Self::pause(self.pacer.delay_before_retry(attempt)).await;
                }
                Err(e) => {
                    warn!(
                        "Could not translate chunk {} after {} attempts: {}. Skipping...",
                        index + 1, self.max_retries, e
                    );
                    progress.on_status(&format!(
                        "Could not translate chunk {} after {} attempts. Skipping...",
                        index + 1, self.max_retries
                    ));
                    return ChunkAttempts {
                        translated: None,
                        calls: attempt as usize,
                    };
                }
            }
        }
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
