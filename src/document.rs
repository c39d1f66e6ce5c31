use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous run of text within a paragraph or list item that is either
/// plain or bold-emphasized. Concatenating the `text` of every span in a
/// block reproduces the source line with the emphasis delimiters removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub emphasized: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One row of a compiled table. Cells are stored as plain text (emphasis
/// delimiters already removed); `emphasized` records whether the renderer
/// should bold the whole row (header rows and TOTAL rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub emphasized: bool,
}

/// One structural unit of the compiled document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Section heading. Level 1 comes from a `##` marker, level 2 from `###`.
    Heading { level: u8, text: String },
    Paragraph { spans: Vec<Span> },
    ListItem { spans: Vec<Span> },
    Table { rows: Vec<TableRow> },
}

/// The compiled report: an ordered block sequence, the sole artifact handed
/// to the rendering collaborator. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &[TableRow]> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table { rows } => Some(rows.as_slice()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the document back to clean markdown. Filtering and
    /// recompiling the output yields the same document.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        for block in &self.blocks {
            match block {
                Block::Heading { level, text } => {
                    let marker = if *level == 1 { "##" } else { "###" };
                    output.push_str(&format!("{} {}\n\n", marker, text));
                }
                Block::Paragraph { spans } => {
                    output.push_str(&spans_to_markdown(spans));
                    output.push_str("\n\n");
                }
                Block::ListItem { spans } => {
                    output.push_str(&format!("- {}\n", spans_to_markdown(spans)));
                }
                Block::Table { rows } => {
                    for (idx, row) in rows.iter().enumerate() {
                        output.push_str(&format!("| {} |\n", row.cells.join(" | ")));
                        if idx == 0 {
                            let separator = vec!["---"; row.cells.len()];
                            output.push_str(&format!("| {} |\n", separator.join(" | ")));
                        }
                    }
                    output.push('\n');
                }
            }
        }

        output
    }
}

fn spans_to_markdown(spans: &[Span]) -> String {
    let mut line = String::new();
    for span in spans {
        if span.emphasized {
            line.push_str(&format!("**{}**", span.text));
        } else {
            line.push_str(&span.text);
        }
    }
    line
}

/// The structured payload the generator is asked to return: the whole
/// report draft as a single markdown string. The derived JSON schema is
/// sent to the model as the response schema.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportDraft {
    #[schemars(
        description = "The complete report as markdown: '##' section headings, prose paragraphs, '- ' bullet lists and pipe-delimited tables. No code blocks."
    )]
    pub markdown: String,
}

impl ReportDraft {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportDraft)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
