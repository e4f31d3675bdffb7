use regex::Regex;
use std::sync::OnceLock;

/// A quoted string literal located on a single source line.
///
/// `start` and `end` are character offsets into the line and cover the
/// delimiters; `inner_text` never includes them. The span boundary at `end`
/// sits just past the closing quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    pub full_match: String,
    pub inner_text: String,
    pub start: usize,
    pub end: usize,
}

/// Pattern for one single-, double-, or backtick-quoted literal.
/// A backslash escapes the following character, so a literal may contain
/// its own delimiter when escaped.
static STRING_LITERAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn string_literal_regex() -> &'static Regex {
    STRING_LITERAL_REGEX.get_or_init(|| {
        Regex::new(r#"'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*"|`(?:\\.|[^`\\])*`"#)
            .expect("STRING_LITERAL_REGEX pattern is invalid - this is a bug")
    })
}

/// Finds the quoted literal on `line_text` whose span contains `offset`.
///
/// Matches are scanned left to right and the first containing match wins.
/// The span test is inclusive of both boundaries, so an offset sitting
/// directly on either quote still counts as inside. Returns `None` when no
/// literal contains the offset.
pub fn locate(line_text: &str, offset: usize) -> Option<LiteralMatch> {
    for m in string_literal_regex().find_iter(line_text) {
        let start = line_text[..m.start()].chars().count();
        let end = start + m.as_str().chars().count();

        if offset >= start && offset <= end {
            let full = m.as_str();
            return Some(LiteralMatch {
                full_match: full.to_string(),
                // The delimiters are single-byte, so slicing them off is safe
                // even for non-ASCII content.
                inner_text: full[1..full.len() - 1].to_string(),
                start,
                end,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locates_literal_under_offset() {
        let line = "Text('Hello $name')";
        let m = locate(line, 8).unwrap();

        assert_eq!(m.full_match, "'Hello $name'");
        assert_eq!(m.inner_text, "Hello $name");
        assert_eq!(m.start, 5);
        assert_eq!(m.end, 18);
    }

    #[test]
    fn span_boundaries_are_inclusive() {
        let line = "Text('Welcome')";
        assert!(locate(line, 5).is_some());
        assert!(locate(line, 14).is_some());
        assert!(locate(line, 4).is_none());
        assert!(locate(line, 15).is_none());
    }

    #[test]
    fn returns_none_without_literal() {
        assert!(locate("final count = 1 + 2;", 5).is_none());
        assert!(locate("", 0).is_none());
    }

    #[test]
    fn respects_escaped_quotes() {
        let line = r"Text('It\'s here')";
        let m = locate(line, 10).unwrap();
        assert_eq!(m.inner_text, r"It\'s here");
    }

    #[test]
    fn matches_double_quotes_and_backticks() {
        let m = locate(r#"print("hi there")"#, 9).unwrap();
        assert_eq!(m.inner_text, "hi there");

        let m = locate("run(`raw text`)", 6).unwrap();
        assert_eq!(m.inner_text, "raw text");
    }

    #[test]
    fn first_containing_match_wins() {
        let line = "f('one', 'two')";
        let m = locate(line, 11).unwrap();
        assert_eq!(m.inner_text, "two");

        // Offset on the boundary between adjacent spans resolves to the
        // earlier literal.
        let m = locate("f('a''b')", 5).unwrap();
        assert_eq!(m.inner_text, "a");
    }

    #[test]
    fn other_quote_kinds_may_appear_inside() {
        let m = locate(r#"f('He said "hi"')"#, 5).unwrap();
        assert_eq!(m.inner_text, r#"He said "hi""#);
    }

    #[test]
    fn offsets_are_character_based() {
        let line = "Text('héllo wörld')";
        let m = locate(line, 10).unwrap();
        assert_eq!(m.inner_text, "héllo wörld");
        assert_eq!(m.start, 5);
        assert_eq!(m.end, 18);
    }
}
