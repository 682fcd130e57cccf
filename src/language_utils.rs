use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the supported translation languages
///
/// The backends only accept the codes listed in `SUPPORTED_LANGUAGES`.
/// Users may also type display names or ISO 639-1 / ISO 639-2 codes,
/// which are resolved onto one of the supported codes.

/// Source-only sentinel asking the backend to detect the language
pub const AUTO_DETECT: &str = "auto";

/// A selectable language: display name and backend code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Human readable name shown to users
    pub name: &'static str,
    /// Code sent to the translation backend
    pub code: &'static str,
}

/// Supported languages in display order, auto-detect first
pub const SUPPORTED_LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry { name: "Auto-detect", code: AUTO_DETECT },
    LanguageEntry { name: "Chinese (Simplified)", code: "zh-CN" },
    LanguageEntry { name: "Chinese (Traditional)", code: "zh-TW" },
    LanguageEntry { name: "Spanish", code: "es" },
    LanguageEntry { name: "Catalan", code: "ca" },
    LanguageEntry { name: "English", code: "en" },
    LanguageEntry { name: "French", code: "fr" },
    LanguageEntry { name: "German", code: "de" },
    LanguageEntry { name: "Italian", code: "it" },
    LanguageEntry { name: "Portuguese", code: "pt" },
    LanguageEntry { name: "Japanese", code: "ja" },
    LanguageEntry { name: "Korean", code: "ko" },
    LanguageEntry { name: "Arabic", code: "ar" },
    LanguageEntry { name: "Russian", code: "ru" },
    LanguageEntry { name: "Dutch", code: "nl" },
    LanguageEntry { name: "Polish", code: "pl" },
];

// ISO 639-2/B codes that differ from their ISO 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// All supported languages, auto-detect first
pub fn supported_languages() -> &'static [LanguageEntry] {
    SUPPORTED_LANGUAGES
}

/// Languages valid as a translation target (everything except auto-detect)
pub fn target_languages() -> impl Iterator<Item = &'static LanguageEntry> {
    SUPPORTED_LANGUAGES.iter().filter(|l| l.code != AUTO_DETECT)
}

/// Find a supported entry by its exact backend code (case-insensitive)
pub fn find_by_code(code: &str) -> Option<&'static LanguageEntry> {
    let code = code.trim();
    SUPPORTED_LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Find a supported entry by display name (case-insensitive)
pub fn find_by_name(name: &str) -> Option<&'static LanguageEntry> {
    let name = name.trim();
    SUPPORTED_LANGUAGES.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Map an ISO 639-1 or ISO 639-2 (T or B) code to its two-letter form
fn iso_to_part1(code: &str) -> Option<String> {
    let normalized = code.trim().to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized).map(|_| normalized),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == normalized)
                .map(|(_, t)| *t)
                .unwrap_or(normalized.as_str());
            Language::from_639_3(part2t)
                .and_then(|lang| lang.to_639_1())
                .map(|code| code.to_string())
        }
        _ => None,
    }
}

/// Resolve user input (code, display name, or ISO code) to a supported backend code
pub fn resolve_language_code(input: &str) -> Result<&'static str> {
    if input.trim().is_empty() {
        return Err(anyhow!("Language code cannot be empty"));
    }

    if let Some(entry) = find_by_code(input).or_else(|| find_by_name(input)) {
        return Ok(entry.code);
    }

    // Bare Chinese defaults to the simplified script
    if let Some(part1) = iso_to_part1(input) {
        let code = if part1 == "zh" { "zh-CN" } else { part1.as_str() };
        if let Some(entry) = find_by_code(code) {
            return Ok(entry.code);
        }
        return Err(anyhow!(
            "Language '{}' ({}) is not supported by the translation backends",
            input,
            get_iso_language_name(&part1).unwrap_or_else(|| part1.clone())
        ));
    }

    Err(anyhow!("Invalid language code: {}", input))
}

/// Check a code for use as the source language; `auto` is allowed
pub fn validate_source_code(code: &str) -> bool {
    find_by_code(code).is_some()
}

/// Check a code for use as the target language; `auto` is rejected
pub fn validate_target_code(code: &str) -> bool {
    find_by_code(code).is_some_and(|l| l.code != AUTO_DETECT)
}

/// Check if two inputs resolve to the same supported language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve_language_code(code1), resolve_language_code(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the display name for a supported code or any resolvable input
pub fn get_language_name(code: &str) -> Result<String> {
    let resolved = resolve_language_code(code)?;
    find_by_code(resolved)
        .map(|l| l.name.to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}

/// English name of any ISO 639-1 code, used in diagnostics
fn get_iso_language_name(part1: &str) -> Option<String> {
    Language::from_639_1(part1).map(|lang| lang.to_name().to_string())
}
