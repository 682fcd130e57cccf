/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::sync::atomic::Ordering;

use doctran::app_config::{Config, TranslationProvider};
use doctran::app_controller::Controller;
use doctran::providers::mock::MockBackend;
use doctran::{AppError, TranslationError};
use doctran::translation::NoProgress;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.is_initialized());
    Ok(())
}

/// Test the controller with a real backend selection
#[test]
fn test_controller_withConfiguredProviders_shouldBuildBackends() -> Result<()> {
    let mut config = Config::default();
    config.source_language = "auto".to_string();
    config.target_language = "de".to_string();
    config.translation.provider = TranslationProvider::MyMemory;
    assert!(Controller::with_config(config.clone()).is_ok());

    config.translation.provider = TranslationProvider::Microsoft;
    assert!(Controller::with_config(config).is_err());
    Ok(())
}

/// Test that re-running the same input reuses the previous translation
#[tokio::test]
async fn test_run_withUnchangedInput_shouldReuseTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.txt", "Same text.")?;

    let backend = MockBackend::working();
    let controller = Controller::with_backend(common::fast_config(), Box::new(backend.clone()))?;

    controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    controller.run(input.clone(), temp_dir.path().to_path_buf(), true).await?;
    assert_eq!(backend.call_count(), 1);

    std::fs::write(&input, "Different text.")?;
    controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert_eq!(backend.call_count(), 2);
    Ok(())
}

/// Test that existing outputs are skipped unless forced
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "doc.txt", "Text.")?;
    common::create_test_file(temp_dir.path(), "doc.es.txt", "old")?;

    let controller = Controller::with_backend(common::fast_config(), Box::new(MockBackend::working()))?;

    let skipped = controller.run(input.clone(), temp_dir.path().to_path_buf(), false).await?;
    assert!(skipped.is_none());
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("doc.es.txt"))?, "old");

    let written = controller.run(input, temp_dir.path().to_path_buf(), true).await?;
    assert!(written.is_some());
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("doc.es.txt"))?, "[es] Text.\n");
    Ok(())
}

/// Test folder mode over a directory with good, bad and previously translated files
#[tokio::test]
async fn test_run_folder_withMixedDocuments_shouldSummarise() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_docx(temp_dir.path(), "a.docx", &["Alpha."])?;
    common::create_test_file(temp_dir.path(), "b.txt", "Beta.")?;
    common::create_test_file(temp_dir.path(), "b.es.txt", "previous output")?;
    common::create_test_file(temp_dir.path(), "empty.txt", "")?;
    common::create_test_file(temp_dir.path(), "c.txt", "Gamma.")?;

    let controller = Controller::with_backend(common::fast_config(), Box::new(MockBackend::working()))?;
    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert!(temp_dir.path().join("a.es.docx").exists());
    assert!(temp_dir.path().join("c.es.txt").exists());
    Ok(())
}

/// Test cancellation before the first chunk
#[tokio::test]
async fn test_translate_file_withCancelFlagSet_shouldStop() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let text = ["First paragraph.", "Second paragraph."].join("\n\n");
    let input = common::create_test_file(temp_dir.path(), "doc.txt", &text)?;

    let mut config = common::fast_config();
    config.translation.common.max_chunk_size = 20;
    let backend = MockBackend::working();
    let controller = Controller::with_backend(config, Box::new(backend.clone()))?;

    controller.cancel_flag().store(true, Ordering::SeqCst);
    let err = controller.translate_file(&input).await.unwrap_err();

    assert!(matches!(err, AppError::Translation(TranslationError::Cancelled { completed: 0, total: 2 })));
    assert_eq!(backend.call_count(), 0);
    Ok(())
}

/// Test that a single-request document also honours the cancel flag
#[tokio::test]
async fn test_translate_file_withShortTextAndCancelFlag_shouldNotCallBackend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "Hello world.")?;

    let backend = MockBackend::working();
    let controller = Controller::with_backend(common::fast_config(), Box::new(backend.clone()))?;

    controller.cancel_flag().store(true, Ordering::SeqCst);
    let err = controller.translate_file(&input).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(backend.call_count(), 0);
    Ok(())
}

/// Test that folder mode stops picking up files once cancelled
#[tokio::test]
async fn test_run_folder_withCancelFlagSet_shouldLeaveFilesUntouched() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.txt", "Alpha.")?;
    common::create_test_file(temp_dir.path(), "b.txt", "Beta.")?;

    let backend = MockBackend::working();
    let controller = Controller::with_backend(common::fast_config(), Box::new(backend.clone()))?;

    controller.cancel_flag().store(true, Ordering::SeqCst);
    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;

    assert!(summary.cancelled);
    assert_eq!(summary.processed + summary.skipped + summary.failed, 0);
    assert_eq!(backend.call_count(), 0);
    assert!(!temp_dir.path().join("a.es.txt").exists());
    assert!(!temp_dir.path().join("b.es.txt").exists());
    Ok(())
}

/// Test that a backend's request cap overrides a larger configured chunk size
#[tokio::test]
async fn test_translate_text_withRequestLimit_shouldSplitToFit() -> Result<()> {
    let paragraph = common::sentence('x', 30);
    let text = [paragraph.as_str(); 4].join("\n\n");

    let mut config = common::fast_config();
    config.translation.common.max_chunk_size = 1500;
    let backend = MockBackend::working().with_request_limit(40);
    let controller = Controller::with_backend(config, Box::new(backend.clone()))?;

    let outcome = controller.translate_text(&text, &NoProgress).await?;

    assert_eq!(outcome.total_chunks, 4);
    assert_eq!(backend.call_count(), 4);
    assert!(outcome.is_complete());
    Ok(())
}

/// Test that a missing input is reported
#[tokio::test]
async fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    let result = controller.run(temp_dir.path().join("nope.docx"), temp_dir.path().to_path_buf(), false).await;
    assert!(result.is_err());
    Ok(())
}
