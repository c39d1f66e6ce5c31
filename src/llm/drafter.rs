use crate::compile_report;
use crate::document::{Document, ReportDraft};
use crate::error::{ReportBuildError, Result};
use crate::llm::prompts::{revision_prompt, REPORT_SYSTEM_PROMPT};
use crate::llm::{client::GeminiClient, types::*};
use log::debug;
use tokio::sync::mpsc::Sender;

const MAX_DRAFT_ATTEMPTS: usize = 3;

/// A report draft that passed structural validation: the raw markdown the
/// generator produced and the document compiled from it.
#[derive(Debug, Clone)]
pub struct DraftedReport {
    pub markdown: String,
    pub document: Document,
}

pub struct ReportDrafter {
    client: GeminiClient,
    model: String,
    system_prompt: String,
}

impl ReportDrafter {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: REPORT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Allow the caller to load a specific prompt (e.g. for different
    /// report types or jurisdictions).
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Drafts the report from the uploaded documents, compiles it, and asks
    /// the model to redraft when the compiled document is structurally
    /// incomplete (no headings, or the ownership table missing entirely).
    pub async fn draft(
        &self,
        documents: &[RemoteDocument],
        progress: Option<Sender<DraftEvent>>,
    ) -> Result<DraftedReport> {
        self.send_event(&progress, DraftEvent::Starting).await;

        let mut manifest = String::from(
            "\n### DOCUMENT MANIFEST\n\
            You have received the following files. Base every statement in the \
            report on their content:\n",
        );
        for (i, doc) in documents.iter().enumerate() {
            manifest.push_str(&format!("{}. \"{}\"\n", i + 1, doc.display_name));
        }

        let instructions = format!(
            "Draft the due diligence report from the attached files.\n{}",
            manifest
        );

        let response_schema = serde_json::to_value(ReportDraft::generate_json_schema())?;
        let mut messages = vec![Content::user_with_files(instructions, documents)];
        let mut last_reason = String::new();

        for attempt in 1..=MAX_DRAFT_ATTEMPTS {
            self.send_event(&progress, DraftEvent::Drafting { attempt })
                .await;

            let raw = self
                .client
                .generate_content(
                    &self.model,
                    &self.system_prompt,
                    messages.clone(),
                    Some(response_schema.clone()),
                )
                .await?;

            let draft: ReportDraft = serde_json::from_str(clean_json_output(&raw))
                .map_err(|e| {
                    ReportBuildError::DraftFailed(format!("Draft JSON parse failed: {}", e))
                })?;

            self.send_event(&progress, DraftEvent::Compiling).await;
            let document = compile_report(&draft.markdown);

            match validate_document(&document) {
                None => {
                    self.send_event(&progress, DraftEvent::Success).await;
                    return Ok(DraftedReport {
                        markdown: draft.markdown,
                        document,
                    });
                }
                Some(reason) => {
                    debug!("draft attempt {} rejected: {}", attempt, reason);
                    self.send_event(
                        &progress,
                        DraftEvent::RevisionNeeded {
                            reason: reason.clone(),
                        },
                    )
                    .await;

                    // Feed the model its own draft so it knows what to fix.
                    messages.push(Content::model(raw));
                    messages.push(Content::user(revision_prompt(&reason)));
                    last_reason = reason;
                }
            }
        }

        self.send_event(
            &progress,
            DraftEvent::Failed {
                reason: last_reason.clone(),
            },
        )
        .await;
        Err(ReportBuildError::DraftRejected {
            attempts: MAX_DRAFT_ATTEMPTS,
            details: last_reason,
        })
    }

    async fn send_event(&self, sender: &Option<Sender<DraftEvent>>, event: DraftEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}

/// Structural acceptance check for a compiled draft. Returns the rejection
/// reason, or `None` when the draft is acceptable.
fn validate_document(document: &Document) -> Option<String> {
    if document.is_empty() {
        return Some("The report compiled to an empty document.".to_string());
    }

    if document.headings().count() == 0 {
        return Some(
            "The report has no '##' section headings; every section must start with one."
                .to_string(),
        );
    }

    if document.tables().count() == 0 {
        return Some(
            "The report has no pipe-delimited table; the share capital and ownership \
            section must contain one, with a final TOTAL row."
                .to_string(),
        );
    }

    None
}

/// Trims any stray prose around the JSON object the model was asked to
/// return.
fn clean_json_output(raw: &str) -> &str {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            return &raw[start..=end];
        }
    }
    raw.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_document() {
        let document = compile_report(
            "## Capital\nTexto.\n| Socios | % |\n|---|---|\n| Ana | 100% |\n| TOTAL | 100% |",
        );
        assert_eq!(validate_document(&document), None);
    }

    #[test]
    fn test_validate_rejects_missing_table() {
        let document = compile_report("## Capital\nSolo texto, sin tabla.");
        let reason = validate_document(&document).unwrap();
        assert!(reason.contains("table"));
    }

    #[test]
    fn test_validate_rejects_missing_headings() {
        let document = compile_report("Texto sin secciones.\n| A | B |");
        let reason = validate_document(&document).unwrap();
        assert!(reason.contains("heading"));
    }

    #[test]
    fn test_clean_json_output() {
        assert_eq!(
            clean_json_output("Here you go:\n{\"markdown\": \"x\"}\nDone."),
            "{\"markdown\": \"x\"}"
        );
        assert_eq!(clean_json_output("  plain  "), "plain");
    }
}
