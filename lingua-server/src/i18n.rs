//! User-facing message catalogs (Fluent)
//!
//! Catalogs are compiled into the binary. Lookups fall back to English when
//! a locale or a key is missing, and finally to the key itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::constants::{DEFAULT_LOCALE, SUPPORTED_LOCALES};

/// Raw Fluent sources, keyed by locale
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/server.ftl")),
    ("es", include_str!("../locales/es/server.ftl")),
];

static BUNDLES: LazyLock<HashMap<&'static str, FluentBundle<FluentResource>>> =
    LazyLock::new(|| {
        CATALOGS
            .iter()
            .map(|(locale, source)| (*locale, build_bundle(locale, source)))
            .collect()
    });

fn build_bundle(locale: &str, source: &str) -> FluentBundle<FluentResource> {
    let langid: LanguageIdentifier = locale.parse().unwrap_or_default();
    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Messages end up in JSON, not bidi-aware UI text
    bundle.set_use_isolating(false);

    let resource = FluentResource::try_new(source.to_string()).unwrap_or_else(|(res, errors)| {
        tracing::error!(locale, ?errors, "message catalog has syntax errors");
        res
    });
    if let Err(errors) = bundle.add_resource(resource) {
        tracing::error!(locale, ?errors, "message catalog has duplicate keys");
    }
    bundle
}

/// Pick the best supported locale from an `Accept-Language` style value
///
/// Only the primary subtag of each entry is considered; quality weights are
/// ignored in favor of list order.
pub fn negotiate_locale(accept_language: &str) -> &'static str {
    accept_language
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .filter_map(|tag| tag.trim().split(['-', '_']).next())
        .find_map(|primary| {
            SUPPORTED_LOCALES
                .iter()
                .copied()
                .find(|supported| supported.eq_ignore_ascii_case(primary))
        })
        .unwrap_or(DEFAULT_LOCALE)
}

fn format(locale: &str, key: &str, args: Option<&FluentArgs<'_>>) -> String {
    [locale, DEFAULT_LOCALE]
        .iter()
        .filter_map(|l| BUNDLES.get(*l))
        .find_map(|bundle| {
            let pattern = bundle.get_message(key)?.value()?;
            let mut errors = Vec::new();
            let text = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                tracing::warn!(key, ?errors, "message formatting errors");
            }
            Some(text.into_owned())
        })
        .unwrap_or_else(|| key.to_string())
}

/// Translate a message key
pub fn t(locale: &str, key: &str) -> String {
    format(locale, key, None)
}

/// Translate a message key with named arguments
pub fn t_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, *value);
    }
    format(locale, key, Some(&fluent_args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_message() {
        assert_eq!(t("en", "err-duplicate-user"), "Username already exists.");
    }

    #[test]
    fn test_spanish_message() {
        assert_eq!(
            t("es", "err-duplicate-user"),
            "El nombre de usuario ya existe."
        );
    }

    #[test]
    fn test_arguments_are_substituted_without_isolation_marks() {
        assert_eq!(
            t_args("en", "msg-welcome", &[("username", "alice")]),
            "Welcome, alice!"
        );
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        assert_eq!(t("de", "err-internal"), t("en", "err-internal"));
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(t("en", "err-does-not-exist"), "err-does-not-exist");
    }

    #[test]
    fn test_every_english_key_exists_in_spanish() {
        let en = BUNDLES.get("en").unwrap();
        let es = BUNDLES.get("es").unwrap();
        let keys = include_str!("../locales/en/server.ftl")
            .lines()
            .filter(|line| !line.starts_with('#') && line.contains(" = "))
            .filter_map(|line| line.split(" = ").next());
        for key in keys {
            assert!(en.has_message(key), "{key} missing from en");
            assert!(es.has_message(key), "{key} missing from es");
        }
    }

    #[test]
    fn test_negotiate_locale() {
        assert_eq!(negotiate_locale("es-MX,es;q=0.9,en;q=0.8"), "es");
        assert_eq!(negotiate_locale("fr-FR, en-GB;q=0.5"), "en");
        assert_eq!(negotiate_locale("de"), "en");
        assert_eq!(negotiate_locale(""), "en");
        assert_eq!(negotiate_locale("ES"), "es");
    }
}
