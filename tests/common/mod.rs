/*!
 * Common test utilities for the doctran test suite
 */

use anyhow::Result;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use doctran::translation::ProgressReporter;

/// Initialise env_logger once so `RUST_LOG=debug` shows library logs
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a .docx with the given paragraphs
pub fn create_test_docx(dir: &Path, filename: &str, paragraphs: &[&str]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    let bytes = doctran::document::docx::serialize(&paragraphs.join("\n\n"))?;
    fs::write(&file_path, bytes)?;
    Ok(file_path)
}

/// Sentence of `len` characters ending with a period
pub fn sentence(fill: char, len: usize) -> String {
    let mut s: String = std::iter::repeat_n(fill, len.saturating_sub(1)).collect();
    s.push('.');
    s
}

/// Progress reporter that records every update
#[derive(Default)]
pub struct RecordingProgress {
    pub updates: Mutex<Vec<(usize, usize)>>,
    pub statuses: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        self.updates.lock().push((completed, total));
    }

    fn on_status(&self, status: &str) {
        self.statuses.lock().push(status.to_string());
    }
}

/// Default configuration with every pacing delay set to zero
pub fn fast_config() -> doctran::Config {
    let mut config = doctran::Config::default();
    let pacing = &mut config.translation.common.pacing;
    pacing.initial_delay_ms = 0;
    pacing.success_delay_ms = 0;
    pacing.retry_delay_ms = 0;
    config
}
