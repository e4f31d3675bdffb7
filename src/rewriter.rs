use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Result of rewriting a literal's inner text against a chosen key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The translation key to store, exactly as chosen by the user.
    pub key: String,
    /// The stored value: interpolation expressions reduced to `$name`
    /// placeholders the generator understands.
    pub value: String,
    /// The code fragment that replaces the literal: the bare key, or a call
    /// with named arguments when interpolations exist.
    pub replacement: String,
}

/// Pattern for `$identifier` and `${expression}` interpolations.
/// Extraction and value rewriting share this single definition so the two
/// passes always see the same set of matches.
static INTERPOLATION_REGEX: OnceLock<Regex> = OnceLock::new();

fn interpolation_regex() -> &'static Regex {
    INTERPOLATION_REGEX.get_or_init(|| {
        Regex::new(r"\$(\w+)|\$\{([^}]+)\}")
            .expect("INTERPOLATION_REGEX pattern is invalid - this is a bug")
    })
}

/// Rewrites `inner_text` into the key/value pair to store and the
/// replacement expression for the source edit.
///
/// Bare `$name` occurrences pass into the value unchanged; braced `${expr}`
/// occurrences become `$name` where `name` is the last path segment of the
/// expression. Without interpolations the replacement is the key itself.
pub fn rewrite(inner_text: &str, base_key: &str) -> Rewrite {
    let regex = interpolation_regex();

    let mut variables: Vec<String> = Vec::new();
    for caps in regex.captures_iter(inner_text) {
        if let Some(expr) = caps.get(1).or_else(|| caps.get(2)) {
            let trimmed = expr.as_str().trim();
            if !trimmed.is_empty() {
                variables.push(trimmed.to_string());
            }
        }
    }

    let value = regex
        .replace_all(inner_text, |caps: &Captures| {
            if let Some(bare) = caps.get(1) {
                format!("${}", bare.as_str())
            } else if let Some(braced) = caps.get(2) {
                format!("${}", extract_method_name(braced.as_str()))
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    if variables.is_empty() {
        return Rewrite {
            key: base_key.to_string(),
            value,
            replacement: base_key.to_string(),
        };
    }

    let named_args: Vec<String> = variables
        .iter()
        .map(|expr| format!("{}:{}", extract_method_name(expr), expr))
        .collect();

    Rewrite {
        key: base_key.to_string(),
        value,
        replacement: format!("{}({})", base_key, named_args.join(", ")),
    }
}

/// Derives an argument name from an interpolation expression: strip one
/// trailing close-paren, split on `.` or `(`, take the last non-empty
/// segment. `user.profile.name()` becomes `name`. Falls back to the raw
/// expression when splitting yields nothing.
///
/// Best-effort only: derived names are not checked for validity or
/// uniqueness, so two expressions ending in the same segment collide in the
/// generated call.
pub fn extract_method_name(expr: &str) -> String {
    let stripped = expr.strip_suffix(')').unwrap_or(expr);
    stripped
        .split(['.', '('])
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or(expr)
        .to_string()
}

/// Suggests a camelCase key for a literal: interpolations stripped out
/// entirely, remaining words joined in camelCase. The key derivation works
/// on interpolation-free text, separate from the value pass.
pub fn suggest_key(inner_text: &str) -> String {
    let stripped = interpolation_regex().replace_all(inner_text, "");
    camel_case(&normalize_nfc(&stripped))
}

/// Normalize to NFC so visually identical suggested keys compare equal.
/// Most ASCII/Latin input is already normalized and takes the borrow path.
fn normalize_nfc(text: &str) -> Cow<'_, str> {
    match is_nfc_quick(text.chars()) {
        IsNormalized::Yes => Cow::Borrowed(text),
        _ => Cow::Owned(text.nfc().collect()),
    }
}

fn camel_case(text: &str) -> String {
    let mut result = String::new();
    let mut first_word = true;

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if first_word {
            result.extend(chars.flat_map(char::to_lowercase));
            first_word = false;
        } else if let Some(head) = chars.next() {
            result.extend(head.to_uppercase());
            result.extend(chars.flat_map(char::to_lowercase));
        }
    }

    result
}
