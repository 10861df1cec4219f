//! Locale presets: interface language, results language, country domain
//! and Accept-Language value for each supported code.

use serde::Serialize;

use crate::{Result, SearchError};

/// A fixed bundle of language settings for one locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalePreset {
    /// Lookup code (e.g. `"jp"`).
    pub iso: &'static str,
    /// Value of the `hl` parameter.
    pub interface_language: &'static str,
    /// Value of the `lr` parameter.
    pub results_language: &'static str,
    /// Google domain suffix (`"com"`, `"co.jp"`, ...).
    pub domain: &'static str,
    /// Value of the `Accept-Language` request header.
    pub accept_language: &'static str,
}

const fn preset(
    iso: &'static str,
    interface_language: &'static str,
    results_language: &'static str,
    domain: &'static str,
    accept_language: &'static str,
) -> LocalePreset {
    LocalePreset {
        iso,
        interface_language,
        results_language,
        domain,
        accept_language,
    }
}

/// Every supported locale. Codes are the lookup keys, not always ISO 639
/// (`dk` and `jp` map to `da` and `ja`).
pub static LOCALES: &[LocalePreset] = &[
    preset("en", "en", "lang_en", "com", "en-us,en;q=0.8"),
    preset("fr", "fr", "lang_fr", "fr", "fr;q=0.8"),
    preset("de", "de", "lang_de", "de", "de;q=0.8"),
    preset("nl", "nl", "lang_nl", "nl", "nl;q=0.8"),
    preset("cs", "cs", "lang_cs", "com", "cs;q=0.8"),
    preset("dk", "da", "lang_da", "dk", "da;q=0.8"),
    preset("jp", "ja", "lang_ja", "co.jp", "ja;q=0.8"),
    preset("es", "es", "lang_es", "es", "es;q=0.8"),
    preset("ru", "ru", "lang_ru", "ru", "ru;q=0.8"),
];

impl LocalePreset {
    /// Looks up a preset by code, ignoring ASCII case.
    pub fn lookup(iso: &str) -> Result<&'static LocalePreset> {
        let iso = iso.trim();
        LOCALES
            .iter()
            .find(|p| p.iso.eq_ignore_ascii_case(iso))
            .ok_or_else(|| SearchError::UnknownLocale(iso.to_string()))
    }

    /// The English preset used by a fresh builder.
    pub fn english() -> &'static LocalePreset {
        &LOCALES[0]
    }
}

/// Returns whether a preset exists for `iso`.
pub fn is_available(iso: &str) -> bool {
    LocalePreset::lookup(iso).is_ok()
}
