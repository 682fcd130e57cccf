/*!
 * Size-bounded text chunking.
 *
 * Splits a document's text into chunks no larger than a configured number of
 * characters, preferring paragraph boundaries, then sentence boundaries, and
 * cutting at a fixed character position only when a single sentence is too
 * long on its own.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranslationError;

/// Blank line separating paragraphs in both input and reassembled output
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

const DELIMITER_CHARS: usize = 2;

// A run of Latin or CJK terminators plus the whitespace that follows it
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？]+\s*").expect("sentence terminator pattern is valid"));

/// How a chunk was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// One or more whole paragraphs joined by the paragraph delimiter
    Paragraphs,
    /// Whole sentences from a single oversized paragraph
    Sentences,
    /// A fixed-size slice of a sentence with no usable terminator
    HardCut,
}

/// A contiguous slice of the input text sent to the backend as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in emission order
    pub index: usize,
    /// Chunk text
    pub content: String,
    /// Size in characters
    pub char_count: usize,
    /// Splitting strategy that produced this chunk
    pub kind: ChunkKind,
    /// True when this chunk continues the paragraph of the previous chunk
    pub continues_paragraph: bool,
}

/// Splits text into size-bounded chunks
#[derive(Debug, Clone)]
pub struct Chunker {
    max_size: usize,
}

// Collects emitted chunks and numbers them
#[derive(Default)]
struct ChunkSink {
    chunks: Vec<Chunk>,
}

impl ChunkSink {
    fn push(&mut self, content: String, kind: ChunkKind, continues_paragraph: bool) {
        let char_count = content.chars().count();
        self.chunks.push(Chunk {
            index: self.chunks.len(),
            content,
            char_count,
            kind,
            continues_paragraph,
        });
    }
}

impl Chunker {
    /// Create a chunker; `max_size` is measured in characters and must be positive
    pub fn new(max_size: usize) -> Result<Self, TranslationError> {
        if max_size == 0 {
            return Err(TranslationError::InvalidChunkSize);
        }
        Ok(Self { max_size })
    }

    /// Maximum chunk size in characters
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Split `text` into ordered chunks
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut sink = ChunkSink::default();
        if text.is_empty() {
            return sink.chunks;
        }

        let mut pending: Vec<&str> = Vec::new();
        // Joined length of `pending`, delimiters included
        let mut pending_len = 0;

        for paragraph in text.split(PARAGRAPH_DELIMITER) {
            let len = paragraph.chars().count();

            if len > self.max_size {
                Self::flush_paragraphs(&mut sink, &mut pending, &mut pending_len);
                self.split_paragraph(paragraph, &mut sink);
                continue;
            }

            let joined_len = if pending.is_empty() {
                len
            } else {
                pending_len + DELIMITER_CHARS + len
            };

            if !pending.is_empty() && joined_len > self.max_size {
                Self::flush_paragraphs(&mut sink, &mut pending, &mut pending_len);
                pending.push(paragraph);
                pending_len = len;
            } else {
                pending.push(paragraph);
                pending_len = joined_len;
            }
        }

        Self::flush_paragraphs(&mut sink, &mut pending, &mut pending_len);
        sink.chunks
    }

    fn flush_paragraphs(sink: &mut ChunkSink, pending: &mut Vec<&str>, pending_len: &mut usize) {
        if pending.is_empty() {
            return;
        }
        sink.push(pending.join(PARAGRAPH_DELIMITER), ChunkKind::Paragraphs, false);
        pending.clear();
        *pending_len = 0;
    }

    // Pack the sentences of one oversized paragraph
    fn split_paragraph(&self, paragraph: &str, sink: &mut ChunkSink) {
        let mut acc = String::new();
        let mut acc_len = 0;
        let mut continues = false;

        for sentence in split_sentences(paragraph) {
            let len = sentence.chars().count();

            if len > self.max_size {
                // Emit what is already packed first so order follows the text
                if !acc.is_empty() {
                    sink.push(std::mem::take(&mut acc), ChunkKind::Sentences, continues);
                    acc_len = 0;
                    continues = true;
                }
                for piece in hard_cut(sentence, self.max_size) {
                    sink.push(piece.to_string(), ChunkKind::HardCut, continues);
                    continues = true;
                }
            } else if acc_len + len > self.max_size {
                sink.push(std::mem::take(&mut acc), ChunkKind::Sentences, continues);
                continues = true;
                acc.push_str(sentence);
                acc_len = len;
            } else {
                acc.push_str(sentence);
                acc_len += len;
            }
        }

        if !acc.is_empty() {
            sink.push(acc, ChunkKind::Sentences, continues);
        }
    }
}

/// Split `text` into chunk strings of at most `max_size` characters
pub fn chunk_text(text: &str, max_size: usize) -> Result<Vec<String>, TranslationError> {
    let chunker = Chunker::new(max_size)?;
    Ok(chunker.split(text).into_iter().map(|c| c.content).collect())
}

/// Split a paragraph into sentences.
///
/// Each sentence keeps its terminator run and the whitespace after it, so
/// concatenating the pieces gives back the paragraph unchanged.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(paragraph) {
        sentences.push(&paragraph[start..m.end()]);
        start = m.end();
    }
    if start < paragraph.len() {
        sentences.push(&paragraph[start..]);
    }

    sentences
}

/// Cut `text` into slices of exactly `max_size` characters; the last may be shorter
pub fn hard_cut(text: &str, max_size: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_size {
            pieces.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

/// Rebuild the original text from its chunks
pub fn reconstruct(chunks: &[Chunk]) -> String {
    let mut text = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 && !chunk.continues_paragraph {
            text.push_str(PARAGRAPH_DELIMITER);
        }
        text.push_str(&chunk.content);
    }
    text
}
