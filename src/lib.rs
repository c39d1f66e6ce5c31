//! # Report Document Builder
//!
//! A library for compiling raw narrative text drafted by an LLM into a
//! presentation-ready structured document (headings, paragraphs with inline
//! emphasis, bulleted lists, and tables) for a rendering backend.
//!
//! ## Core Concepts
//!
//! - **Raw text**: the unmodified generator output, markdown-ish prose that
//!   sometimes carries scratch-code artifacts (fenced blocks, `print(...)`
//!   fragments, stray assignments)
//! - **Noise filter**: drops those artifacts line by line while protecting
//!   tables and headings unconditionally
//! - **Document compiler**: accumulates the surviving lines into typed
//!   blocks, buffering consecutive table rows into a single table
//! - **Table integrity**: a pipe-delimited row is never dropped or mangled;
//!   the ownership/capital table is the most important data in a report
//!
//! ## Example
//!
//! ```rust
//! use report_document_builder::{compile_report, Block};
//!
//! let raw = "\
//! ### Capital social
//! print(\"socios = 2\")
//! La sociedad tiene **dos socios**.
//! | Socios | % |
//! |---|---|
//! | Ana | 50% |
//! | **TOTAL** | **100%** |
//! ";
//!
//! let document = compile_report(raw);
//! assert!(matches!(document.blocks[0], Block::Heading { level: 1, .. }));
//! assert_eq!(document.tables().count(), 1);
//! ```

pub mod compiler;
pub mod document;
pub mod error;
pub mod filter;
pub mod spans;

#[cfg(feature = "gemini")]
pub mod llm;

pub use compiler::DocumentCompiler;
pub use document::{Block, Document, ReportDraft, Span, TableRow};
pub use error::{ReportBuildError, Result};
pub use filter::{classify_line, filter_raw_text, strip_fenced_regions, LineVerdict};
pub use spans::{parse_spans, spans_to_plain, strip_emphasis};

use log::{debug, info};

pub struct ReportCompiler;

impl ReportCompiler {
    /// Runs the full pipeline: noise filtering, then block compilation.
    /// Total by design; malformed generator output degrades to plain
    /// paragraphs instead of failing.
    pub fn compile(raw: &str) -> Document {
        let input_lines = raw.lines().count();
        let kept = filter_raw_text(raw);

        info!(
            "compiling report: {} input lines, {} kept after filtering",
            input_lines,
            kept.len()
        );

        let document = DocumentCompiler::compile(&kept);
        debug!("compiled {} blocks", document.blocks.len());

        document
    }
}

pub fn compile_report(raw: &str) -> Document {
    ReportCompiler::compile(raw)
}
