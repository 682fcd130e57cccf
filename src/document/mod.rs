/*!
 * Document source and sink.
 *
 * - `docx`: WordprocessingML text extraction and serialization
 * - `plain`: UTF-8 text files
 * - `convert`: legacy .doc to .docx through a headless office suite
 *
 * Every reader yields plain text with paragraphs separated by a blank line and
 * no empty paragraphs; every writer turns each such paragraph back into one
 * paragraph of the output format.
 */

use log::info;
use std::path::Path;

use crate::app_config::DocumentConfig;
use crate::errors::DocumentError;
use crate::file_utils::FileType;

pub mod convert;
pub mod docx;
pub mod plain;

/// Extract text from document bytes of a known type
pub async fn extract_text(file_type: FileType, bytes: &[u8], config: &DocumentConfig) -> Result<String, DocumentError> {
    match file_type {
        FileType::Docx => docx::extract_text(bytes),
        FileType::Doc => {
            info!("Converting legacy .doc document to .docx...");
            let converted = convert::convert_doc_to_docx(bytes, config).await?;
            docx::extract_text(&converted)
        }
        FileType::Text => plain::extract_text(bytes),
        FileType::Unknown => Err(DocumentError::UnsupportedFormat("unrecognised file contents".to_string())),
    }
}

/// Read a document file and return its paragraph text
pub async fn load_document_text(path: &Path, config: &DocumentConfig) -> Result<String, DocumentError> {
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(DocumentError::InvalidInput(format!("{} is not a file", display)));
    }

    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(DocumentError::EmptyDocument(display));
    }

    let file_type = FileType::sniff(path, &bytes);
    if file_type == FileType::Unknown {
        return Err(DocumentError::UnsupportedFormat(display));
    }

    let text = extract_text(file_type, &bytes, config).await?;
    if text.trim().is_empty() {
        return Err(DocumentError::EmptyDocument(display));
    }

    Ok(text)
}

/// Serialize text in the given output format
pub fn serialize(file_type: FileType, text: &str) -> Result<Vec<u8>, DocumentError> {
    match file_type {
        FileType::Text => Ok(plain::serialize(text)),
        _ => docx::serialize(text),
    }
}
