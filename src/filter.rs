use log::debug;

/// Classification of one input line. `Protected` lines survive filtering
/// unconditionally, `Noise` lines are dropped, `Ordinary` lines are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    Protected,
    Noise,
    Ordinary,
}

/// The ordered noise decision table. Each entry is a named predicate over
/// the trimmed line; the first match wins. Protection checks run before
/// this table ever gets consulted, so a predicate can never drop a table
/// row or heading.
const NOISE_PREDICATES: &[(&str, fn(&str) -> bool)] = &[
    ("print-call", is_print_call),
    ("statement-prefix", is_statement_prefix),
    ("assignment-fragment", is_assignment_fragment),
    ("bare-language-token", is_bare_language_token),
    ("append-call", is_append_call),
];

fn is_print_call(line: &str) -> bool {
    line.starts_with("print(") || line.starts_with("print (")
}

fn is_statement_prefix(line: &str) -> bool {
    line.starts_with("def ")
        || line.starts_with("import ")
        || (line.starts_with("from ") && line.contains(" import "))
}

/// An `=` together with arithmetic or bracket characters reads as generated
/// scratch computation. `-` is deliberately not in the set: hyphenated
/// narrative and dash runs must never match.
fn is_assignment_fragment(line: &str) -> bool {
    line.contains('=') && line.chars().any(|c| "+*/()[]".contains(c))
}

fn is_bare_language_token(line: &str) -> bool {
    const LANGUAGE_TOKENS: &[&str] = &["python", "json", "markdown", "text"];
    LANGUAGE_TOKENS
        .iter()
        .any(|token| line.eq_ignore_ascii_case(token))
}

fn is_append_call(line: &str) -> bool {
    line.contains(".append(")
}

fn is_table_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

/// Classifies one trimmed line. Table rows are checked first: several noise
/// predicates (the assignment fragment in particular) can spuriously match
/// numeric rows, and a dropped data row is the one failure this pipeline
/// must never produce.
pub fn classify_line(trimmed: &str) -> LineVerdict {
    if is_table_row(trimmed) {
        return LineVerdict::Protected;
    }
    if trimmed.starts_with('#') {
        return LineVerdict::Protected;
    }

    for (name, predicate) in NOISE_PREDICATES {
        if predicate(trimmed) {
            debug!("dropping line as noise ({}): {}", name, trimmed);
            return LineVerdict::Noise;
        }
    }

    LineVerdict::Ordinary
}

/// Removes every matched pair of fence marker lines together with the lines
/// between them. Markers are paired greedily left to right; an opening
/// marker with no later close is left in place so trailing legitimate
/// content is never silently deleted.
pub fn strip_fenced_regions(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());

    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        if line.trim_start().starts_with("```") {
            if let Some(close) = lines[idx + 1..]
                .iter()
                .position(|l| l.trim_start().starts_with("```"))
            {
                debug!("stripping fenced region of {} lines", close);
                idx += close + 2;
                continue;
            }
        }
        kept.push(line);
        idx += 1;
    }

    kept.join("\n")
}

/// The noise-filtering pass: strips fenced regions, then keeps every
/// non-blank line that does not classify as noise, in its original
/// untrimmed form (indentation and list markers are output concerns that
/// classification ignores).
pub fn filter_raw_text(raw: &str) -> Vec<String> {
    let without_fences = strip_fenced_regions(raw);

    without_fences
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && classify_line(trimmed) != LineVerdict::Noise
        })
        .map(|line| line.to_string())
        .collect()
}
