use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn, info, debug};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::app_config::Config;
use crate::document;
use crate::errors::{AppError, TranslationError};
use crate::file_utils::{FileManager, FileType};
use crate::providers::{self, TranslationBackend};
use crate::providers::mock::MockBackend;
use crate::session::{CachedTranslation, InputId, TranslationSession};
use crate::translation::{ProgressReporter, TranslationOutcome, TranslationPipeline};

// @module: Application controller for document translation

// @returns: Bar style counting `unit`, with a plain fallback template
fn progress_style(unit: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
            unit
        ))
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

/// Progress reporter drawing an indicatif bar on stderr
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressBarReporter {
    /// Create a chunk progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(1);
        bar.set_style(progress_style("chunks"));
        Self { bar }
    }

    /// Create a reporter that draws nothing
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressBarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn on_progress(&self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }

    fn on_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }
}

/// Counts from a folder run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FolderSummary {
    /// Files translated and written
    pub processed: usize,
    /// Files skipped because their output already exists
    pub skipped: usize,
    /// Files that failed
    pub failed: usize,
    /// The run stopped early on the cancel flag
    pub cancelled: bool,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Selected translation backend
    backend: Box<dyn TranslationBackend>,
    // @field: Memo of the last translation
    session: Mutex<TranslationSession>,
    // @field: Set to stop between chunks
    cancel: Arc<AtomicBool>,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Controller {
    /// Create a controller backed by a working mock backend with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_backend(Config::default(), Box::new(MockBackend::working()))
    }

    // @method: Create a new controller with the backend selected in the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let backend = providers::create_backend(&config.translation)
            .context("Failed to create translation backend")?;
        Self::with_backend(config, backend)
    }

    // @method: Create a new controller with an explicit backend
    pub fn with_backend(config: Config, backend: Box<dyn TranslationBackend>) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            backend,
            session: Mutex::new(TranslationSession::new()),
            cancel: Arc::new(AtomicBool::new(false)),
            show_progress: false,
        })
    }

    /// Draw progress bars while translating
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Flag that stops a running translation between chunks
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn pipeline(&self) -> Result<TranslationPipeline, TranslationError> {
        let pipeline = TranslationPipeline::from_config(&self.config.translation.common)?
            .with_request_limit(self.backend.max_request_chars())?
            .with_cancellation(Arc::clone(&self.cancel));
        Ok(pipeline)
    }

    fn progress_reporter(&self) -> ProgressBarReporter {
        if self.show_progress {
            ProgressBarReporter::new()
        } else {
            ProgressBarReporter::hidden()
        }
    }

    /// Translate plain text with the configured languages and backend
    pub async fn translate_text(&self, text: &str, progress: &dyn ProgressReporter) -> Result<TranslationOutcome, AppError> {
        let outcome = self.pipeline()?
            .translate_detailed(
                text,
                &self.config.target_language,
                &self.config.source_language,
                self.backend.as_ref(),
                progress,
            )
            .await?;

        if !outcome.is_complete() {
            warn!(
                "{} of {} sections could not be translated and were replaced with a placeholder",
                outcome.failed_chunks.len(),
                outcome.total_chunks
            );
        }

        Ok(outcome)
    }

    /// Extract and translate a document, reusing the last result when nothing changed
    pub async fn translate_file(&self, input_file: &Path) -> Result<String, AppError> {
        let input_id = InputId::from_file(input_file).await?;

        let backend = self.backend.name().to_string();
        let (source, target) = (&self.config.source_language, &self.config.target_language);

        let (cached, known_source) = {
            let session = self.session.lock();
            (
                session.cached_translation(&input_id, &backend, source, target).map(str::to_string),
                session.cached_source(&input_id).map(str::to_string),
            )
        };
        if let Some(translated) = cached {
            info!("Reusing previous translation of {}", input_id.name);
            return Ok(translated);
        }

        let source_text = match known_source {
            Some(text) => {
                debug!("Reusing extracted text of {}", input_id.name);
                text
            }
            None => document::load_document_text(input_file, &self.config.document).await?,
        };
        debug!("Extracted {} characters from {}", source_text.chars().count(), input_id.name);

        info!("Translating with {} ({} -> {})...", self.config.translation.provider.display_name(), source, target);
        let progress = self.progress_reporter();
        let result = self.translate_text(&source_text, &progress).await;
        progress.finish();
        let outcome = result?;

        self.session.lock().record(CachedTranslation {
            input: input_id,
            backend,
            source_language: source.clone(),
            target_language: target.clone(),
            source_text,
            translated_text: outcome.text.clone(),
        });

        Ok(outcome.text)
    }

    /// Output path for an input document, chosen from its name
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        let extension = FileType::from_extension(input_file).output_extension();
        FileManager::generate_output_path(input_file, output_dir, &self.config.target_language, extension)
    }

    /// Translate one document into `output_dir`.
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// `force_overwrite` is off.
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path = self.output_path_for(&input_file, &output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, translation already exists (use -f to force overwrite)", input_file);
            return Ok(None);
        }

        let translated = self.translate_file(&input_file).await?;
        let bytes = document::serialize(FileType::from_extension(&output_path), &translated)?;
        FileManager::write_bytes(&output_path, &bytes)?;

        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Translate one document and return the text instead of writing a file
    pub async fn run_to_stdout(&self, input_file: &Path) -> Result<String> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        Ok(self.translate_file(input_file).await?)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, translating every document in a directory.
    /// Outputs are written next to their inputs; existing outputs are skipped.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let target = &self.config.target_language;
        let documents: Vec<PathBuf> = FileManager::find_documents(&input_dir)?
            .into_iter()
            .filter(|path| !FileManager::is_translated_output(path, target))
            .collect();

        if documents.is_empty() {
            return Err(anyhow::anyhow!("No documents found in directory: {:?}", input_dir));
        }

        let folder_pb = if self.show_progress {
            ProgressBar::new(documents.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        folder_pb.set_style(progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for path in documents.iter() {
            if self.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let file_name = path.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = match path.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.clone(),
            };

            match self.run(path.clone(), output_dir, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) if self.is_cancelled() => {
                    warn!("Stopped while translating {}: {:#}", file_name, e);
                    summary.cancelled = true;
                    break;
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        if summary.cancelled {
            let done = summary.processed + summary.skipped + summary.failed;
            warn!("Folder processing cancelled, {} file(s) left untranslated", documents.len() - done);
            folder_pb.abandon_with_message("Folder processing cancelled");
        } else {
            folder_pb.finish_with_message("Folder processing complete");
        }

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors ({})",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }
}
