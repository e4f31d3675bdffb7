use anyhow::{bail, Result};

use crate::locator::LiteralMatch;

/// Replaces the located literal's span on `line_index` (0-based) with
/// `replacement`, leaving every other line and the file's newline layout
/// untouched.
///
/// Span offsets are character offsets, as produced by the locator. Errors
/// when the line index is out of range or the span does not fit on the line.
pub fn replace_literal(
    source: &str,
    line_index: usize,
    literal: &LiteralMatch,
    replacement: &str,
) -> Result<String> {
    let lines: Vec<&str> = source.split('\n').collect();

    let Some(line) = lines.get(line_index) else {
        bail!(
            "Line {} is out of range ({} lines)",
            line_index + 1,
            lines.len()
        );
    };

    if literal.end > line.chars().count() {
        bail!(
            "Literal span {}..{} does not fit on line {}",
            literal.start,
            literal.end,
            line_index + 1
        );
    }

    let prefix: String = line.chars().take(literal.start).collect();
    let suffix: String = line.chars().skip(literal.end).collect();
    let edited = format!("{}{}{}", prefix, replacement, suffix);

    let result: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| if i == line_index { edited.as_str() } else { *l })
        .collect();

    Ok(result.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator;
    use pretty_assertions::assert_eq;

    fn literal_on(line: &str, offset: usize) -> LiteralMatch {
        locator::locate(line, offset).unwrap()
    }

    #[test]
    fn replaces_only_the_literal_span() {
        let source = "import 'x.dart';\nText('Hello $name')\nmore();";
        let literal = literal_on("Text('Hello $name')", 8);

        let edited = replace_literal(source, 1, &literal, "t.greeting(name:name)").unwrap();

        assert_eq!(
            edited,
            "import 'x.dart';\nText(t.greeting(name:name))\nmore();"
        );
    }

    #[test]
    fn keeps_surrounding_text_on_the_line() {
        let source = "return Text('Welcome', style: style);";
        let literal = literal_on(source, 14);

        let edited = replace_literal(source, 0, &literal, "t.welcome").unwrap();
        assert_eq!(edited, "return Text(t.welcome, style: style);");
    }

    #[test]
    fn rejects_out_of_range_line() {
        let literal = literal_on("'x'", 1);
        assert!(replace_literal("only one line", 3, &literal, "k").is_err());
    }

    #[test]
    fn rejects_span_past_line_end() {
        let literal = literal_on("Text('Hello, quite long')", 8);
        assert!(replace_literal("short\n'x'", 1, &literal, "k").is_err());
    }

    #[test]
    fn handles_multibyte_text_before_the_literal() {
        let source = "präfix('héllo')";
        let literal = literal_on(source, 9);

        let edited = replace_literal(source, 0, &literal, "t.hello").unwrap();
        assert_eq!(edited, "präfix(t.hello)");
    }
}
