/*!
 * Document translation core.
 *
 * - `chunker`: splits text into size-bounded chunks on paragraph and sentence boundaries
 * - `pacing`: delay policies applied between backend requests
 * - `pipeline`: sequential chunk translation with retry and placeholder substitution
 */

pub use self::chunker::{Chunk, ChunkKind, Chunker, PARAGRAPH_DELIMITER, chunk_text, reconstruct};
pub use self::pacing::{ExponentialBackoffPacer, FixedDelayPacer, Pacer, PacingConfig, PacingStrategy};
pub use self::pipeline::{NoProgress, ProgressReporter, SENTINEL, TranslationOutcome, TranslationPipeline};

pub mod chunker;
pub mod pacing;
pub mod pipeline;
