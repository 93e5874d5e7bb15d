//! Small helpers for emitting Graphviz DOT text.

use std::borrow::Cow;
use std::fmt::Write as _;

/// Quotes `s` as a DOT string literal body (without the surrounding quotes).
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['"', '\\', '\n']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Returns `s` unchanged when it is a valid bare DOT identifier, a quoted string otherwise.
pub fn id(s: &str) -> Cow<'_, str> {
    let bare = s
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("\"{}\"", escape(s)))
    }
}

/// Edge attributes; `None` fields are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeStyle<'a> {
    pub label: Option<&'a str>,
    pub color: Option<&'a str>,
}

/// Writes `    from -> to [label="..", color=".."]`, omitting the attribute list when empty.
pub fn write_edge(out: &mut String, from: &str, to: &str, style: EdgeStyle<'_>) {
    let _ = write!(out, "    {from} -> {to}");
    let mut attrs = Vec::with_capacity(2);
    if let Some(label) = style.label {
        attrs.push(format!("label=\"{}\"", escape(label)));
    }
    if let Some(color) = style.color {
        attrs.push(format!("color=\"{color}\""));
    }
    if !attrs.is_empty() {
        let _ = write!(out, " [{}]", attrs.join(", "));
    }
    out.push('\n');
}

/// Writes the trailing caption of a top-level graph.
pub fn write_caption(out: &mut String, caption: &str) {
    out.push_str("    labelloc=\"t\";\n");
    let _ = writeln!(out, "    label=\"{}\";", escape(caption));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_quotes_and_backslashes() {
        assert_eq!(escape("PLUS"), "PLUS");
        assert_eq!(escape(r#"'"'"#), r#"'\"'"#);
        assert_eq!(escape(r"'\\'"), r"'\\\\'");
    }

    #[test]
    fn id_quotes_only_when_needed() {
        assert_eq!(id("ATN_for_expr"), "ATN_for_expr");
        assert_eq!(id("ATN for expr"), "\"ATN for expr\"");
        assert_eq!(id("1st"), "\"1st\"");
    }

    #[test]
    fn edge_attributes_are_optional() {
        let mut out = String::new();
        write_edge(&mut out, "state0", "state1", EdgeStyle::default());
        write_edge(
            &mut out,
            "state1",
            "state2",
            EdgeStyle {
                label: Some("'+'"),
                color: Some("#434f5a"),
            },
        );
        assert_eq!(
            out,
            "    state0 -> state1\n    state1 -> state2 [label=\"'+'\", color=\"#434f5a\"]\n"
        );
    }
}
