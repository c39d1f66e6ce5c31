use crate::document::Span;

/// Splits a prose line on the `**` emphasis delimiter into alternating
/// plain and emphasized runs. Zero-length runs between adjacent delimiters
/// are omitted. An opening delimiter with no matching close is kept as
/// literal text, so malformed generator output degrades instead of failing.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = line;
    let mut emphasized = false;

    while let Some(idx) = rest.find("**") {
        let (head, tail) = rest.split_at(idx);
        if !head.is_empty() {
            spans.push(Span {
                text: head.to_string(),
                emphasized,
            });
        }

        let tail = &tail[2..];

        if !emphasized && !tail.contains("**") {
            // Unterminated opener: everything from the delimiter on is literal.
            spans.push(Span::plain(format!("**{}", tail)));
            return spans;
        }

        emphasized = !emphasized;
        rest = tail;
    }

    if !rest.is_empty() {
        spans.push(Span {
            text: rest.to_string(),
            emphasized,
        });
    }

    spans
}

/// Concatenates the span texts of a line, i.e. the line with all balanced
/// emphasis delimiters removed.
pub fn spans_to_plain(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Strips balanced emphasis delimiters from a fragment of text. Used for
/// table cells and headings, where emphasis is a rendering concern recorded
/// elsewhere.
pub fn strip_emphasis(text: &str) -> String {
    spans_to_plain(&parse_spans(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_runs() {
        let spans = parse_spans("El capital es **100%** del total");
        assert_eq!(
            spans,
            vec![
                Span::plain("El capital es "),
                Span::emphasized("100%"),
                Span::plain(" del total"),
            ]
        );
    }

    #[test]
    fn test_plain_line() {
        let spans = parse_spans("Sin enfasis alguno");
        assert_eq!(spans, vec![Span::plain("Sin enfasis alguno")]);
    }

    #[test]
    fn test_leading_and_trailing_emphasis() {
        let spans = parse_spans("**TOTAL** y **100%**");
        assert_eq!(
            spans,
            vec![
                Span::emphasized("TOTAL"),
                Span::plain(" y "),
                Span::emphasized("100%"),
            ]
        );
    }

    #[test]
    fn test_unterminated_delimiter_is_literal() {
        let spans = parse_spans("texto **sin cierre");
        assert_eq!(
            spans,
            vec![Span::plain("texto "), Span::plain("**sin cierre")]
        );
    }

    #[test]
    fn test_odd_third_delimiter_is_literal() {
        let spans = parse_spans("a **b** c **d");
        assert_eq!(
            spans,
            vec![
                Span::plain("a "),
                Span::emphasized("b"),
                Span::plain(" c "),
                Span::plain("**d"),
            ]
        );
    }

    #[test]
    fn test_empty_spans_omitted() {
        assert_eq!(parse_spans("****"), Vec::<Span>::new());
        assert_eq!(parse_spans("a****b"), vec![Span::plain("a"), Span::plain("b")]);
    }

    #[test]
    fn test_round_trip_removes_delimiters() {
        let line = "El **51%** pertenece a **Ana Garcia**";
        let spans = parse_spans(line);
        assert_eq!(spans_to_plain(&spans), "El 51% pertenece a Ana Garcia");
    }

    #[test]
    fn test_strip_emphasis_on_cell() {
        assert_eq!(strip_emphasis("**TOTAL**"), "TOTAL");
        assert_eq!(strip_emphasis("Ana"), "Ana");
    }
}
