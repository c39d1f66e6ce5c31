use report_document_builder::compile_report;

const SAMPLE_DRAFT: &str = "\
# INFORME DE DUE DILIGENCE

## 1. Capital social y socios

print(\"reparto = 50 + 50\")

La sociedad tiene **dos socios** con el siguiente reparto:

| Socios | Participacion |
|---|---|
| Ana Garcia | 50% |
| Luis Perez | 50% |
| **TOTAL** | **100%** |

### Observaciones

- El capital esta **integramente desembolsado**.
";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let document = compile_report(SAMPLE_DRAFT);

    println!("Compiled {} blocks\n", document.blocks.len());
    println!("--- JSON ---\n{}\n", document.to_json()?);
    println!("--- Clean markdown ---\n{}", document.to_markdown());

    Ok(())
}
