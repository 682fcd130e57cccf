/*!
 * Re-translation decision and session memo.
 */

use log::debug;

use super::models::{CachedTranslation, InputId};

/// Decide whether a new translation run is needed.
///
/// Returns true when there is a current input and either the input identity
/// or the selected backend differs from the previous run.
pub fn should_retranslate(
    prev_input: Option<&InputId>,
    curr_input: Option<&InputId>,
    prev_backend: Option<&str>,
    curr_backend: &str,
) -> bool {
    let Some(curr_input) = curr_input else {
        return false;
    };

    prev_input != Some(curr_input) || prev_backend != Some(curr_backend)
}

/// Explicit state carried between translation requests
#[derive(Debug, Default, Clone)]
pub struct TranslationSession {
    last: Option<CachedTranslation>,
}

impl TranslationSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless the last run used the same input, backend and languages
    pub fn needs_translation(&self, input: &InputId, backend: &str, source_language: &str, target_language: &str) -> bool {
        let Some(last) = &self.last else {
            return true;
        };

        should_retranslate(Some(&last.input), Some(input), Some(&last.backend), backend)
            || last.source_language != source_language
            || last.target_language != target_language
    }

    /// Translation from the last run, if it matches this request
    pub fn cached_translation(&self, input: &InputId, backend: &str, source_language: &str, target_language: &str) -> Option<&str> {
        if self.needs_translation(input, backend, source_language, target_language) {
            return None;
        }
        self.last.as_ref().map(|l| l.translated_text.as_str())
    }

    /// Remember a completed run
    pub fn record(&mut self, translation: CachedTranslation) {
        debug!("Session recorded translation of {} via {}", translation.input, translation.backend);
        self.last = Some(translation);
    }

    /// Extracted text of the last run's input, if `input` is the same document
    pub fn cached_source(&self, input: &InputId) -> Option<&str> {
        self.last
            .as_ref()
            .filter(|l| &l.input == input)
            .map(|l| l.source_text.as_str())
    }

    /// Forget the last run
    pub fn clear(&mut self) {
        self.last = None;
    }
}
