use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::usage::LanguageColor;

/// Item name -> color value (hex or any token the renderer accepts).
/// Ordered so lookups and merges are reproducible.
pub type ColorMap = BTreeMap<String, String>;

static BARE_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-fA-F0-9]{6}|[a-fA-F0-9]{3})$").expect("valid hex regex"));

/// True for "3572A5" or "fff", false for "#3572A5" or named colors
pub fn is_hex_without_hash(color: &str) -> bool {
    BARE_HEX.is_match(color)
}

/// Prefix bare 3/6 digit hex values with `#`. Everything else passes through
/// untouched; validating odd values is left to the renderer.
pub fn normalize(colors: ColorMap) -> ColorMap {
    colors
        .into_iter()
        .map(|(name, color)| {
            if is_hex_without_hash(&color) {
                (name, format!("#{}", color))
            } else {
                (name, color)
            }
        })
        .collect()
}

/// Build a color map from registry entries, later entries winning
pub fn from_languages(languages: &[LanguageColor]) -> ColorMap {
    languages
        .iter()
        .map(|l| (l.name.clone(), l.color.clone()))
        .collect()
}

/// Merge the three color sources of a request.
///
/// Precedence: request overrides > group colors > remote colors.
///
/// Group colors and overrides are folded into every already-known key that
/// matches them case-insensitively (so `"Rust"` rewrites the registry's
/// `"rust"` entry under the registry's spelling); a name matching nothing is
/// inserted under its own spelling. This keeps one spelling per name, so the
/// renderer's case-insensitive lookup always sees the winning color.
pub fn resolve(
    overrides: Option<&ColorMap>,
    remote: &ColorMap,
    group: Option<&ColorMap>,
) -> ColorMap {
    let mut merged = remote.clone();

    for layer in [group, overrides].into_iter().flatten() {
        for (name, color) in layer {
            fold_color(&mut merged, name, color);
        }
    }

    merged
}

fn fold_color(merged: &mut ColorMap, name: &str, color: &str) {
    let lower = name.to_lowercase();
    let mut found = false;

    for (key, value) in merged.iter_mut() {
        if key.to_lowercase() == lower {
            *value = color.to_string();
            found = true;
        }
    }

    if !found {
        merged.insert(name.to_string(), color.to_string());
    }
}
