use std::path::Path;

use report_document_builder::llm::{DraftEvent, GeminiClient, ReportDrafter};

/// End-to-end drafting demo: uploads the documents given on the command
/// line, asks Gemini for a due diligence report draft, and prints the
/// compiled document.
///
/// Usage: GOOGLE_API_KEY=... cargo run --example draft_report --features gemini -- deed.pdf
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let api_key = std::env::var("GOOGLE_API_KEY")
        .map_err(|_| anyhow::anyhow!("GOOGLE_API_KEY is not set"))?;
    let client = GeminiClient::new(api_key);

    let models = client.list_models().await?;
    println!("Models accepting generateContent on this account:");
    for model in &models {
        println!("  {}", model.short_name());
    }

    let model = models
        .iter()
        .map(|m| m.short_name())
        .find(|name| name.starts_with("gemini"))
        .unwrap_or("gemini-2.0-flash")
        .to_string();
    println!("Using model: {}\n", model);

    let mut documents = Vec::new();
    for arg in std::env::args().skip(1) {
        println!("Uploading {}...", arg);
        documents.push(client.upload_document(Path::new(&arg)).await?);
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel::<DraftEvent>(16);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("  [{:?}]", event);
        }
    });

    let drafter = ReportDrafter::new(client, model);
    let report = drafter.draft(&documents, Some(tx)).await?;

    println!("\n--- Compiled document ---\n{}", report.document.to_json()?);
    println!("\n--- Clean markdown ---\n{}", report.document.to_markdown());

    Ok(())
}
