/*!
 * Mock backend implementations for testing.
 *
 * This module provides a mock backend that simulates different behaviors:
 * - `MockBackend::working()` - Always succeeds with tagged text
 * - `MockBackend::failing()` - Always fails with an error
 * - `MockBackend::fail_first(n)` - Fails the first `n` attempts for each distinct text
 * - `MockBackend::intermittent(n)` - Fails every `n`th request
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Each distinct text fails this many times, then succeeds
    FailFirst { failures: usize },
    /// Fails every Nth request
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// Mock backend for testing translation behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total request counter
    request_count: Arc<AtomicUsize>,
    /// Requests seen per input text
    per_text: Arc<Mutex<HashMap<String, usize>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, &str, &str) -> String>,
    /// Advertised request length cap
    request_limit: Option<usize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            per_text: Arc::new(Mutex::new(HashMap::new())),
            custom_response: None,
            request_limit: None,
        }
    }

    /// Create a working mock backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock backend that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a backend that fails `failures` times per text before succeeding
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create an intermittently failing mock backend
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a backend that answers after `delay_ms` milliseconds
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Advertise a maximum request length, like services with a query cap
    pub fn with_request_limit(mut self, max_chars: usize) -> Self {
        self.request_limit = Some(max_chars);
        self
    }

    /// Set a custom response generator taking (text, source, target)
    pub fn with_custom_response(mut self, generator: fn(&str, &str, &str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Total number of requests received
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of requests received for exactly this text
    pub fn calls_for(&self, text: &str) -> usize {
        self.per_text.lock().get(text).copied().unwrap_or(0)
    }

    fn success(&self, text: &str, source: &str, target: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(text, source, target),
            None => format!("[{}] {}", target, text),
        }
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            per_text: Arc::clone(&self.per_text),
            custom_response: self.custom_response,
            request_limit: self.request_limit,
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn max_request_chars(&self) -> Option<usize> {
        self.request_limit
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        let seen_for_text = {
            let mut per_text = self.per_text.lock();
            let entry = per_text.entry(text.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        match self.behavior {
            MockBehavior::Working => Ok(self.success(text, source_language, target_language)),

            MockBehavior::FailFirst { failures } => {
                if seen_for_text <= failures {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated transient failure (attempt {})",
                        seen_for_text
                    )))
                } else {
                    Ok(self.success(text, source_language, target_language))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.success(text, source_language, target_language))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.success(text, source_language, target_language))
            }
        }
    }
}
