/*!
 * Tests for file and directory utilities
 */

use std::path::PathBuf;

use doctran::file_utils::{FileManager, FileType};
use crate::common;

/// Test directory creation and file round trips
#[test]
fn test_write_bytes_withMissingParent_shouldCreateDirectories() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("a").join("b").join("out.txt");

    FileManager::write_bytes(&path, b"content").unwrap();

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("a").join("b")));
    assert_eq!(FileManager::read_bytes(&path).unwrap(), b"content");
}

/// Test recursive discovery of supported documents
#[test]
fn test_find_documents_withMixedFiles_shouldReturnSupportedSorted() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("nested");
    FileManager::ensure_dir(&nested).unwrap();

    common::create_test_file(temp_dir.path(), "b.txt", "b").unwrap();
    common::create_test_file(temp_dir.path(), "a.DOCX", "a").unwrap();
    common::create_test_file(&nested, "c.doc", "c").unwrap();
    common::create_test_file(temp_dir.path(), "image.png", "x").unwrap();

    let found = FileManager::find_documents(temp_dir.path()).unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.DOCX", "b.txt", "c.doc"]);
}

/// Test output naming for each input type
#[test]
fn test_generate_output_path_withTargetLanguage_shouldInsertCode() {
    let output = FileManager::generate_output_path("/docs/informe.doc", "/out", "zh-CN", FileType::Doc.output_extension());
    assert_eq!(output, PathBuf::from("/out/informe.zh-CN.docx"));

    let output = FileManager::generate_output_path("notes.txt", "", "fr", FileType::Text.output_extension());
    assert_eq!(output, PathBuf::from("notes.fr.txt"));
}

/// Test that output types follow the input name, not its contents
#[test]
fn test_from_extension_withTranslatedOutputs_shouldPickWriter() {
    let temp_dir = common::create_temp_dir().unwrap();
    let docx = common::create_test_docx(temp_dir.path(), "real.docx", &["Hello"]).unwrap();
    let text = common::create_test_file(temp_dir.path(), "plain.txt", "Hello").unwrap();

    assert_eq!(FileType::from_extension(&docx), FileType::Docx);
    assert_eq!(FileType::from_extension(&text).output_extension(), "txt");
    assert_eq!(FileType::from_extension(&temp_dir.path().join("old.doc")).output_extension(), "docx");
}
