/*!
 * Translation session state.
 *
 * This module provides:
 * - Input identity (name, size and content digest)
 * - The pure re-translation decision
 * - An explicit session object that memoises the last translation
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::{TranslationSession, should_retranslate};
pub use models::{CachedTranslation, InputId};
