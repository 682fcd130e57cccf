/*!
 * # doctran - Document translation through online translation services
 *
 * A Rust library for translating Word and text documents chunk by chunk.
 *
 * ## Features
 *
 * - Extract paragraph text from .docx, legacy .doc (via LibreOffice) and .txt files
 * - Split long text on paragraph and sentence boundaries into bounded chunks
 * - Translate chunks sequentially using one of several backends:
 *   - Google Translate
 *   - Microsoft Azure Translator
 *   - MyMemory
 * - Retry failed chunks with configurable pacing, substituting a placeholder
 *   for sections that still fail
 * - Write the translation back as a .docx or .txt document
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document reading, conversion and writing
 * - `translation`: Chunking, pacing and the translation pipeline
 * - `providers`: Client implementations for the translation services
 * - `session`: Input identity and re-translation decisions
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Supported languages and code resolution
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use language_utils::{get_language_name, resolve_language_code};
pub use providers::TranslationBackend;
pub use translation::{Chunker, TranslationPipeline, chunk_text};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError};
