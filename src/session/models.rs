/*!
 * Session models.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

use crate::file_utils::FileManager;

/// Hex digits of the content digest kept in an input id
const DIGEST_LEN: usize = 16;

/// Identity of an input document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputId {
    /// File name without directories
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Truncated SHA-256 of the contents, lowercase hex
    pub digest: String,
}

impl InputId {
    /// Identify an in-memory document
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let digest = format!("{:x}", Sha256::digest(bytes));
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            digest: digest[..DIGEST_LEN].to_string(),
        }
    }

    /// Identify a document on disk, hashing it off the async runtime
    pub async fn from_file(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let bytes = FileManager::read_bytes(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            Ok(Self::from_bytes(name, &bytes))
        })
        .await
        .context("File hashing task panicked")?
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{} ({})", self.name, self.size, self.digest)
    }
}

/// The last completed translation held by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTranslation {
    /// Input the translation was produced from
    pub input: InputId,
    /// Backend selection key
    pub backend: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Extracted source text
    pub source_text: String,
    /// Reassembled translation
    pub translated_text: String,
}
