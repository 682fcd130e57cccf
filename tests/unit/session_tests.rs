/*!
 * Tests for session state and the re-translation decision
 */

use doctran::session::{CachedTranslation, InputId, TranslationSession, should_retranslate};
use crate::common;

/// Test the decision for an unchanged file and backend
#[test]
fn test_should_retranslate_withUnchangedState_shouldBeFalse() {
    let id = InputId::from_bytes("report.docx", b"bytes");
    assert!(!should_retranslate(Some(&id), Some(&id.clone()), Some("google"), "google"));
}

/// Test that renaming a file changes its identity
#[test]
fn test_should_retranslate_withRenamedFile_shouldBeTrue() {
    let before = InputId::from_bytes("report.docx", b"bytes");
    let after = InputId::from_bytes("report-v2.docx", b"bytes");
    assert_eq!(before.digest, after.digest);
    assert!(should_retranslate(Some(&before), Some(&after), Some("google"), "google"));
}

/// Test that switching backends with an input present triggers a run
#[test]
fn test_should_retranslate_withBackendSwitch_shouldBeTrue() {
    let id = InputId::from_bytes("report.docx", b"bytes");
    assert!(should_retranslate(Some(&id), Some(&id), Some("google"), "microsoft"));
    assert!(!should_retranslate(None, None, Some("google"), "microsoft"));
}

/// Test the session memo against on-disk files
#[tokio::test]
async fn test_session_withFileIdentity_shouldMemoiseUntilContentChanges() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "notes.txt", "Hello.").unwrap();
    let id = InputId::from_file(&path).await.unwrap();

    let mut session = TranslationSession::new();
    session.record(CachedTranslation {
        input: id.clone(),
        backend: "mymemory".to_string(),
        source_language: "en".to_string(),
        target_language: "es".to_string(),
        source_text: "Hello.".to_string(),
        translated_text: "Hola.".to_string(),
    });
    assert_eq!(session.cached_translation(&id, "mymemory", "en", "es"), Some("Hola."));

    std::fs::write(&path, "Hello again.").unwrap();
    let changed = InputId::from_file(&path).await.unwrap();
    assert!(session.needs_translation(&changed, "mymemory", "en", "es"));
    assert!(session.cached_translation(&changed, "mymemory", "en", "es").is_none());
}
