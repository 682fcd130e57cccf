/*!
 * Tests for document extraction and serialization
 */

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use doctran::app_config::DocumentConfig;
use doctran::document::{self, docx, plain};
use doctran::errors::DocumentError;
use doctran::file_utils::FileType;
use crate::common;

/// Build a .docx whose document part is exactly `xml`
fn docx_with_body(xml: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Test extraction from a document written by a word processor
#[test]
fn test_docx_extract_text_withStyledRuns_shouldJoinParagraphs() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>第一章</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">这是 </w:t></w:r><w:r><w:t>测试。</w:t></w:r></w:p>
    <w:p><w:r><w:t>   </w:t></w:r></w:p>
    <w:p><w:r><w:t>Fin &lt;3</w:t></w:r></w:p>
    <w:sectPr/>
  </w:body>
</w:document>"#;

    let text = docx::extract_text(&docx_with_body(xml)).unwrap();
    assert_eq!(text, "第一章\n\n这是 测试。\n\nFin <3");
}

/// Test that a zip without a document part is malformed
#[test]
fn test_docx_extract_text_withoutDocumentPart_shouldFail() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"<x/>").unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    assert!(matches!(docx::extract_text(&bytes), Err(DocumentError::Malformed(_))));
}

/// Test that serialization writes one paragraph per block and skips blanks
#[test]
fn test_docx_serialize_withBlankBlocks_shouldSkipThem() {
    let text = "Uno\n\n \n\nDos & tres";
    let bytes = docx::serialize(text).unwrap();

    assert_eq!(docx::extract_text(&bytes).unwrap(), "Uno\n\nDos & tres");
    assert_eq!(FileType::sniff(std::path::Path::new("x.docx"), &bytes), FileType::Docx);
}

/// Test plain text reading
#[test]
fn test_plain_extract_text_withWindowsLineEndings_shouldNormalise() {
    assert_eq!(plain::extract_text(b"a\r\n\r\nb").unwrap(), "a\n\nb");
}

/// Test loading each supported file type
#[tokio::test]
async fn test_load_document_text_withSupportedFiles_shouldReturnParagraphs() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = DocumentConfig::default();

    let docx_path = common::create_test_docx(temp_dir.path(), "in.docx", &["One.", "Two."]).unwrap();
    assert_eq!(document::load_document_text(&docx_path, &config).await.unwrap(), "One.\n\nTwo.");

    let txt_path = common::create_test_file(temp_dir.path(), "in.txt", "One.\n\nTwo.\n").unwrap();
    assert_eq!(document::load_document_text(&txt_path, &config).await.unwrap(), "One.\n\nTwo.");

    let blank_path = common::create_test_file(temp_dir.path(), "blank.txt", "\n\n   \n").unwrap();
    assert!(matches!(
        document::load_document_text(&blank_path, &config).await,
        Err(DocumentError::EmptyDocument(_))
    ));
}

/// Test that a legacy document without a converter reports a remediation hint
#[tokio::test]
async fn test_load_document_text_withDocAndNoConverter_shouldExplain() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("legacy.doc");
    std::fs::write(&path, [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0, 0]).unwrap();

    let config = DocumentConfig {
        converter_command: "doctran-missing-converter".to_string(),
        conversion_timeout_secs: 5,
    };
    let err = document::load_document_text(&path, &config).await.unwrap_err();

    assert!(matches!(err, DocumentError::ConverterUnavailable));
    assert!(err.to_string().contains(".docx"));
}

/// Test serializing in the format chosen for the output
#[test]
fn test_serialize_withTextType_shouldWritePlainText() {
    let bytes = document::serialize(FileType::Text, "Hola.\n\nAdiós.").unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "Hola.\n\nAdiós.\n");

    let bytes = document::serialize(FileType::Doc, "Hola.").unwrap();
    assert_eq!(docx::extract_text(&bytes).unwrap(), "Hola.");
}
