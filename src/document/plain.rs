use crate::errors::DocumentError;
use crate::translation::PARAGRAPH_DELIMITER;

/// Decode a UTF-8 text file into delimiter-separated paragraphs.
///
/// Line endings are normalised to `\n`, a leading BOM is dropped and blank
/// paragraphs are removed, matching what the .docx reader yields.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DocumentError::InvalidInput(format!("text file is not valid UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).replace("\r\n", "\n");

    Ok(text
        .split(PARAGRAPH_DELIMITER)
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.trim_matches('\n'))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_DELIMITER))
}

/// Encode text for a .txt output, ending with a newline
pub fn serialize(text: &str) -> Vec<u8> {
    let mut out = text.trim_end().to_string();
    out.push('\n');
    out.into_bytes()
}
