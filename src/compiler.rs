use log::debug;

use crate::document::{Block, Document, TableRow};
use crate::spans::{parse_spans, strip_emphasis};

/// Accumulates a filtered line stream into an ordered block sequence.
/// Two states: `Default`, and "in table" whenever the row buffer is
/// non-empty. Any non-table line flushes the buffer and is then processed
/// normally in the same pass, so no line is ever lost between a table and
/// the text that follows it.
pub struct DocumentCompiler {
    blocks: Vec<Block>,
    table_buffer: Vec<Vec<String>>,
}

impl DocumentCompiler {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            table_buffer: Vec::new(),
        }
    }

    pub fn compile<I, S>(lines: I) -> Document
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiler = Self::new();
        for line in lines {
            compiler.push_line(line.as_ref());
        }
        compiler.finish()
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Blank lines are ignored and do not flush a pending table: the
        // generator routinely splits one table with empty lines.
        if trimmed.is_empty() {
            return;
        }

        if is_table_row(trimmed) {
            if !is_separator_row(trimmed) {
                self.table_buffer.push(split_table_row(trimmed));
            }
            return;
        }

        self.flush_table();

        if let Some(rest) = trimmed.strip_prefix("###") {
            self.blocks.push(Block::Heading {
                level: 2,
                text: strip_emphasis(rest.trim()),
            });
        } else if let Some(rest) = trimmed.strip_prefix("##") {
            self.blocks.push(Block::Heading {
                level: 1,
                text: strip_emphasis(rest.trim()),
            });
        } else if let Some(rest) = trimmed.strip_prefix("- ") {
            self.blocks.push(Block::ListItem {
                spans: parse_spans(rest),
            });
        } else {
            // Everything else, including bare single-`#` lines, is a
            // paragraph: only `##` and `###` are recognized heading markers.
            self.blocks.push(Block::Paragraph {
                spans: parse_spans(trimmed),
            });
        }
    }

    /// Converts the pending row buffer into a `Table` block. Column count
    /// is fixed by the header row: excess cells are dropped, missing cells
    /// filled with empty text. The header row and every row whose first
    /// cell contains "total" (case-insensitive) are marked emphasized for
    /// the renderer. A zero-row flush is a no-op.
    fn flush_table(&mut self) {
        if self.table_buffer.is_empty() {
            return;
        }

        let raw_rows = std::mem::take(&mut self.table_buffer);
        let column_count = raw_rows[0].len();
        debug!(
            "flushing table: {} rows, {} columns",
            raw_rows.len(),
            column_count
        );

        let rows = raw_rows
            .into_iter()
            .enumerate()
            .map(|(idx, mut cells)| {
                cells.truncate(column_count);
                cells.resize(column_count, String::new());

                let is_total_row = cells
                    .first()
                    .is_some_and(|cell| cell.to_lowercase().contains("total"));

                TableRow {
                    cells,
                    emphasized: idx == 0 || is_total_row,
                }
            })
            .collect();

        self.blocks.push(Block::Table { rows });
    }

    fn finish(mut self) -> Document {
        // End of input is a valid flush trigger.
        self.flush_table();
        Document {
            blocks: self.blocks,
        }
    }
}

impl Default for DocumentCompiler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// A separator row carries no data and is discarded, never stored.
fn is_separator_row(trimmed: &str) -> bool {
    trimmed.contains("---")
}

/// Splits a table-row line into trimmed cells, dropping the leading and
/// trailing empty cells produced by the line's own boundary delimiters.
/// Emphasis delimiters inside cells are removed: row-level emphasis is
/// recorded on the `TableRow` instead.
fn split_table_row(trimmed: &str) -> Vec<String> {
    let mut cells: Vec<&str> = trimmed.split('|').collect();

    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }

    cells
        .into_iter()
        .map(|cell| strip_emphasis(cell.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Span;

    fn compile(lines: &[&str]) -> Document {
        DocumentCompiler::compile(lines.iter().copied())
    }

    #[test]
    fn test_heading_levels() {
        let doc = compile(&["## Resumen", "### Detalle"]);
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Resumen".to_string()
                },
                Block::Heading {
                    level: 2,
                    text: "Detalle".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_single_hash_is_paragraph() {
        let doc = compile(&["# INFORME DE DUE DILIGENCE"]);
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                spans: vec![Span::plain("# INFORME DE DUE DILIGENCE")],
            }]
        );
    }

    #[test]
    fn test_list_item_marker_stripped() {
        let doc = compile(&["- Ana: **50%**"]);
        assert_eq!(
            doc.blocks,
            vec![Block::ListItem {
                spans: vec![Span::plain("Ana: "), Span::emphasized("50%")],
            }]
        );
    }

    #[test]
    fn test_table_accumulation_and_separator_discard() {
        let doc = compile(&["| Socios | % |", "|---|---|", "| Ana | 50% |"]);
        assert_eq!(
            doc.blocks,
            vec![Block::Table {
                rows: vec![
                    TableRow {
                        cells: vec!["Socios".to_string(), "%".to_string()],
                        emphasized: true,
                    },
                    TableRow {
                        cells: vec!["Ana".to_string(), "50%".to_string()],
                        emphasized: false,
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_blank_line_does_not_split_table() {
        let doc = compile(&["| A | B |", "", "| 1 | 2 |"]);
        assert_eq!(doc.tables().count(), 1);
        assert_eq!(doc.tables().next().unwrap().len(), 2);
    }

    #[test]
    fn test_non_table_line_flushes_and_is_kept() {
        let doc = compile(&["| A | B |", "| 1 | 2 |", "Texto posterior"]);
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[0], Block::Table { .. }));
        assert!(matches!(doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn test_column_normalization() {
        let doc = compile(&[
            "| A | B | C |",
            "| 1 | 2 |",
            "| 1 | 2 | 3 | 4 |",
        ]);
        let rows = doc.tables().next().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.cells.len() == 3));
        assert_eq!(rows[1].cells[2], "");
        assert_eq!(rows[2].cells, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_total_row_emphasized() {
        let doc = compile(&[
            "| Socios | % |",
            "| Ana | 50% |",
            "| **TOTAL** | **100%** |",
        ]);
        let rows = doc.tables().next().unwrap();
        assert!(rows[0].emphasized, "header row must be emphasized");
        assert!(!rows[1].emphasized);
        assert!(rows[2].emphasized, "TOTAL row must be emphasized");
        assert_eq!(rows[2].cells, vec!["TOTAL", "100%"]);
    }

    #[test]
    fn test_total_detection_is_case_insensitive() {
        let doc = compile(&["| Concepto | Importe |", "| Total capital | 3.000 |"]);
        let rows = doc.tables().next().unwrap();
        assert!(rows[1].emphasized);
    }

    #[test]
    fn test_end_of_input_flushes_table() {
        let doc = compile(&["Parrafo", "| A | B |", "| 1 | 2 |"]);
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[1], Block::Table { .. }));
    }

    #[test]
    fn test_single_row_table_accepted() {
        let doc = compile(&["| solo |"]);
        let rows = doc.tables().next().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].emphasized);
    }

    #[test]
    fn test_empty_input_yields_empty_document() {
        let doc = compile(&[]);
        assert!(doc.is_empty());
    }
}
