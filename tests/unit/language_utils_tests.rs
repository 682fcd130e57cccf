/*!
 * Tests for language code utilities
 */

use doctran::language_utils::{self, AUTO_DETECT};

/// Test resolving codes, display names and ISO codes
#[test]
fn test_resolve_language_code_withVariousInputs_shouldReturnSupportedCode() {
    assert_eq!(language_utils::resolve_language_code("zh-CN").unwrap(), "zh-CN");
    assert_eq!(language_utils::resolve_language_code("zh-cn").unwrap(), "zh-CN");
    assert_eq!(language_utils::resolve_language_code("Chinese (Simplified)").unwrap(), "zh-CN");
    assert_eq!(language_utils::resolve_language_code("english").unwrap(), "en");
    assert_eq!(language_utils::resolve_language_code("fra").unwrap(), "fr");
    assert_eq!(language_utils::resolve_language_code("fre").unwrap(), "fr");
    assert_eq!(language_utils::resolve_language_code("zh").unwrap(), "zh-CN");
    assert_eq!(language_utils::resolve_language_code("Auto-detect").unwrap(), AUTO_DETECT);
}

/// Test that unknown and unsupported languages are rejected
#[test]
fn test_resolve_language_code_withUnsupportedInput_shouldFail() {
    assert!(language_utils::resolve_language_code("").is_err());
    assert!(language_utils::resolve_language_code("not-a-language").is_err());
    // Swahili is a real language the backends are not configured for
    let err = language_utils::resolve_language_code("sw").unwrap_err();
    assert!(err.to_string().contains("not supported"));
}

/// Test source and target validation
#[test]
fn test_validate_codes_withAuto_shouldOnlyAllowSource() {
    assert!(language_utils::validate_source_code(AUTO_DETECT));
    assert!(!language_utils::validate_target_code(AUTO_DETECT));
    assert!(language_utils::validate_target_code("es"));
    assert!(!language_utils::validate_source_code("Spanish"));
}

/// Test language name lookups
#[test]
fn test_get_language_name_withCode_shouldReturnDisplayName() {
    assert_eq!(language_utils::get_language_name("ca").unwrap(), "Catalan");
    assert_eq!(language_utils::get_language_name("deu").unwrap(), "German");
    assert!(language_utils::language_codes_match("ger", "de"));
    assert!(!language_utils::language_codes_match("en", "es"));
}

/// Test the language table
#[test]
fn test_supported_languages_shouldStartWithAutoDetect() {
    let languages = language_utils::supported_languages();
    assert_eq!(languages[0].code, AUTO_DETECT);
    assert!(languages.iter().any(|l| l.name == "Chinese (Simplified)" && l.code == "zh-CN"));
    assert!(languages.iter().any(|l| l.name == "English" && l.code == "en"));
}
