// SPDX-License-Identifier: MPL-2.0
use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None, &Config::default())
    }
}

impl I18n {
    /// Loads the embedded translations, then any `.ftl` files in `i18n_dir`
    /// (same file name replaces the embedded bundle).
    pub fn new(cli_lang: Option<String>, i18n_dir: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(content) = Asset::get(filename) {
                let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
                insert_bundle(&mut bundles, filename, source);
            }
        }

        if let Some(dir) = i18n_dir {
            load_dir(&mut bundles, Path::new(&dir));
        }

        let mut available_locales: Vec<LanguageIdentifier> = bundles.keys().cloned().collect();
        available_locales.sort_by_key(|locale| locale.to_string());

        let current_locale = resolve_locale(
            cli_lang,
            config.general.language.clone(),
            sys_locale::get_locale(),
            &available_locales,
        )
        .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.to_string());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn default_locale() -> LanguageIdentifier {
    LanguageIdentifier::from_bytes(DEFAULT_LOCALE.as_bytes()).unwrap_or_default()
}

/// Parses one `.ftl` source into a bundle keyed by its file stem.
/// Files with an unparsable name or syntax errors are skipped.
fn insert_bundle(
    bundles: &mut HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    filename: &str,
    source: String,
) {
    let Some(locale) = filename
        .strip_suffix(".ftl")
        .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
    else {
        return;
    };
    let Ok(resource) = FluentResource::try_new(source) else {
        return;
    };

    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Keep formatted strings free of bidi isolation marks
    bundle.set_use_isolating(false);
    if bundle.add_resource(resource).is_ok() {
        bundles.insert(locale, bundle);
    }
}

fn load_dir(bundles: &mut HashMap<LanguageIdentifier, FluentBundle<FluentResource>>, dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Ok(source) = fs::read_to_string(&path) {
            insert_bundle(bundles, filename, source);
        }
    }
}

/// Picks the first available locale among CLI, config, then OS.
fn resolve_locale(
    cli_lang: Option<String>,
    config_lang: Option<String>,
    os_locale: Option<String>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    [cli_lang, config_lang, os_locale]
        .into_iter()
        .flatten()
        .filter_map(|lang| lang.parse::<LanguageIdentifier>().ok())
        .find_map(|lang| match_available(&lang, available))
}

/// Exact match first, then same language ("fr-CA" picks "fr").
fn match_available(
    lang: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if available.contains(lang) {
        return Some(lang.clone());
    }
    available
        .iter()
        .find(|candidate| candidate.language == lang.language)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn resolve_locale_prefers_cli() {
        let lang = resolve_locale(
            Some("fr".to_string()),
            Some("en-US".to_string()),
            Some("en-US".to_string()),
            &available(),
        );
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_uses_config_before_os() {
        let lang = resolve_locale(
            None,
            Some("fr".to_string()),
            Some("en-US".to_string()),
            &available(),
        );
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_falls_back_to_os() {
        let lang = resolve_locale(None, None, Some("fr-FR".to_string()), &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_skips_unavailable_cli_lang() {
        let lang = resolve_locale(
            Some("de".to_string()),
            Some("fr".to_string()),
            None,
            &available(),
        );
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_returns_none_when_nothing_matches() {
        let lang = resolve_locale(Some("ja".to_string()), None, None, &available());
        assert_eq!(lang, None);
    }

    #[test]
    fn embedded_bundles_include_english_and_french() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert!(i18n.available_locales.contains(&"en-US".parse().unwrap()));
        assert!(i18n.available_locales.contains(&"fr".parse().unwrap()));
    }

    #[test]
    fn tr_returns_english_text() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert_eq!(i18n.tr("acquisition-select-button"), "Select Image");
    }

    #[test]
    fn tr_marks_missing_keys() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn tr_with_args_substitutes_values() {
        let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());
        let text = i18n.tr_with_args("result-confidence-value", &[("value", "87")]);
        assert_eq!(text, "87%");
    }

    #[test]
    fn i18n_dir_overrides_embedded_strings() {
        let dir = tempdir().expect("failed to create temp dir");
        fs::write(
            dir.path().join("en-US.ftl"),
            "acquisition-select-button = Pick a photo\n",
        )
        .expect("write ftl");

        let i18n = I18n::new(
            Some("en-US".to_string()),
            Some(dir.path().to_string_lossy().to_string()),
            &Config::default(),
        );
        assert_eq!(i18n.tr("acquisition-select-button"), "Pick a photo");
    }

    #[test]
    fn malformed_override_file_keeps_embedded_bundle() {
        let dir = tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join("en-US.ftl"), "= = =\n").expect("write ftl");

        let i18n = I18n::new(
            Some("en-US".to_string()),
            Some(dir.path().to_string_lossy().to_string()),
            &Config::default(),
        );
        assert_eq!(i18n.tr("acquisition-select-button"), "Select Image");
    }
}
