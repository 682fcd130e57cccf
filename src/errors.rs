/*!
 * Error types for the doctran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when calling a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while reading, converting or writing documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file is missing, empty or not a document we can read
    #[error("Invalid input file: {0}")]
    InvalidInput(String),

    /// The file extension or content is not a supported document type
    #[error("Unsupported document format: {0}. Supported formats are .docx, .doc and .txt")]
    UnsupportedFormat(String),

    /// The document could be opened but contains no text
    #[error("Document contains no text: {0}")]
    EmptyDocument(String),

    /// The document container or XML is malformed
    #[error("Failed to read document: {0}")]
    Malformed(String),

    /// The office suite used for .doc conversion is not installed
    #[error("LibreOffice not found. Install LibreOffice to convert .doc files, or save the file as .docx in Word and try again")]
    ConverterUnavailable,

    /// The office suite did not finish in time
    #[error("Conversion timed out after {0} seconds. The file may be too large or corrupted; try saving it as .docx")]
    ConversionTimeout(u64),

    /// The office suite ran but produced no output
    #[error("Conversion failed: {0}. Try saving the file as .docx in Word and upload it again")]
    ConversionFailed(String),

    /// Writing the translated document failed
    #[error("Failed to write document: {0}")]
    Write(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur before or during a translation run
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A language code that is unknown, or not valid in its position
    #[error("Invalid {role} language: {code}")]
    InvalidLanguage {
        /// "source" or "target"
        role: &'static str,
        /// The rejected code
        code: String,
    },

    /// Chunk size must be at least one character
    #[error("Maximum chunk size must be greater than zero")]
    InvalidChunkSize,

    /// Malformed translation configuration
    #[error("Invalid translation configuration: {0}")]
    Config(String),

    /// The run was cancelled between chunks
    #[error("Translation cancelled after {completed} of {total} chunks")]
    Cancelled {
        /// Chunks finished before cancellation
        completed: usize,
        /// Total chunks in the run
        total: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("{0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl AppError {
    /// True when the run was stopped by the cancel flag
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Translation(TranslationError::Cancelled { .. }))
    }
}

impl ProviderError {
    /// Classify a non-success HTTP status into the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            429 => Self::RateLimitExceeded(message),
            401 | 403 => Self::AuthenticationError(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}
