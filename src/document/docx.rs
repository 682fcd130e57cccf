/*!
 * WordprocessingML (.docx) reading and writing.
 *
 * Only paragraph text is carried across: runs are flattened, tabs and line
 * breaks are kept, styling is dropped.
 */

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use std::io::{Cursor, Read, Write};
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::errors::DocumentError;
use crate::translation::PARAGRAPH_DELIMITER;

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_FOOTER: &str = "<w:sectPr/></w:body></w:document>";

/// Extract the paragraph text of a .docx package.
///
/// Paragraphs that are empty or whitespace-only are dropped; the rest are
/// joined with the blank-line paragraph delimiter.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Malformed(format!("not a .docx package: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| DocumentError::Malformed(format!("{} missing: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)?;

    let paragraphs = parse_paragraphs(&xml)?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_DELIMITER))
}

/// Collect the text of every `<w:p>` in a document part.
///
/// Paragraphs nested inside a run (text boxes) are emitted when they close,
/// ahead of the paragraph that contains them.
pub fn parse_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    // Open paragraphs, innermost last
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                // <w:tab/> also appears in paragraph properties; only runs carry text
                b"w:tab" if run_depth > 0 => push_text(&mut open, "\t"),
                b"w:br" | b"w:cr" if run_depth > 0 => push_text(&mut open, "\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| DocumentError::Malformed(format!("bad text in {}: {}", DOCUMENT_PART, e)))?;
                push_text(&mut open, &text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Malformed(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_text(open: &mut [String], text: &str) {
    if let Some(paragraph) = open.last_mut() {
        paragraph.push_str(text);
    }
}

/// Build a minimal .docx package with one paragraph per non-blank block of `text`
pub fn serialize(text: &str) -> Result<Vec<u8>, DocumentError> {
    let document_xml = document_xml(text);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        (DOCUMENT_PART, document_xml.as_str()),
    ] {
        zip.start_file(name, options)
            .map_err(|e| DocumentError::Write(format!("{}: {}", name, e)))?;
        zip.write_all(content.as_bytes())?;
    }

    let cursor = zip.finish().map_err(|e| DocumentError::Write(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// The `word/document.xml` body for `text`
pub fn document_xml(text: &str) -> String {
    let mut xml = String::from(DOCUMENT_HEADER);

    for paragraph in text.split(PARAGRAPH_DELIMITER).filter(|p| !p.trim().is_empty()) {
        xml.push_str("<w:p><w:r>");
        for (i, line) in paragraph.split('\n').enumerate() {
            if i > 0 {
                xml.push_str("<w:br/>");
            }
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !segment.is_empty() {
                    xml.push_str(r#"<w:t xml:space="preserve">"#);
                    xml.push_str(&escape(segment));
                    xml.push_str("</w:t>");
                }
            }
        }
        xml.push_str("</w:r></w:p>");
    }

    xml.push_str(DOCUMENT_FOOTER);
    xml
}
