use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Canonical token for remote work in normalized location lists.
pub const REMOTE_TOKEN: &str = "remote";

const REMOTE_SPELLINGS: &[&str] = &[
    "remote",
    "fully remote",
    "work from home",
    "wfh",
    "anywhere",
    "online",
    "virtual",
];

/// Preference entries that state no location constraint at all.
const OPEN_PREFERENCE_SPELLINGS: &[&str] = &[
    "anywhere",
    "any",
    "any location",
    "no preference",
    "flexible",
    "pan india",
];

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// NFKC + lowercase + trimmed, with internal whitespace collapsed to one space.
///
/// Full-width input (`Ｄｅｌｈｉ`) and stray spacing from free-form company
/// forms compare equal to their plain spelling.
pub fn normalize_token(raw: &str) -> String {
    let folded: String = raw.nfkc().collect::<String>().to_lowercase();
    RE_WHITESPACE.replace_all(folded.trim(), " ").into_owned()
}

pub fn is_remote_token(raw: &str) -> bool {
    let token = normalize_token(raw);
    REMOTE_SPELLINGS.contains(&token.as_str())
}

/// Location token used for preference comparison. Remote spellings collapse to
/// [`REMOTE_TOKEN`].
pub fn normalize_location(raw: &str) -> String {
    if is_remote_token(raw) {
        REMOTE_TOKEN.to_string()
    } else {
        normalize_token(raw)
    }
}

/// Normalizes a preference list, dropping blanks and later duplicates so the
/// first occurrence keeps its rank.
///
/// Open-ended entries (`Anywhere`, `No preference`) are dropped too: on a
/// listing "anywhere" means remote, but in a preference list it means the
/// student has no constraint.
pub fn normalize_location_preferences(raw: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(raw.len());
    for location in raw {
        if OPEN_PREFERENCE_SPELLINGS.contains(&normalize_token(location).as_str()) {
            continue;
        }
        let token = normalize_location(location);
        if token.is_empty() || normalized.contains(&token) {
            continue;
        }
        normalized.push(token);
    }
    normalized
}

/// Clamps loosely validated numeric input to `>= 0`. NaN becomes 0.
pub fn clamp_non_negative(value: f64) -> f64 {
    value.max(0.0)
}
