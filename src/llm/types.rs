use serde::{Deserialize, Serialize};

/// Progress notifications emitted while a report draft is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DraftEvent {
    Starting,
    Uploading { filename: String },
    Drafting { attempt: usize },
    Compiling,
    RevisionNeeded { reason: String },
    Success,
    Failed { reason: String },
}

/// A file uploaded to the Gemini Files API, ready to be referenced from a
/// generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument {
    pub uri: String,
    pub name: String,
    pub display_name: String,
    pub mime_type: String,
    pub state: String,
}

/// One model entry from the models listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether the model can serve text generation requests.
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }

    /// The bare model id, without the "models/" resource prefix.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    pub fn user_with_files(text: impl Into<String>, documents: &[RemoteDocument]) -> Self {
        let mut parts = vec![Part::Text { text: text.into() }];
        for doc in documents {
            parts.push(Part::FileData {
                file_data: FileData {
                    mime_type: doc.mime_type.clone(),
                    file_uri: doc.uri.clone(),
                },
            });
        }
        Self {
            role: "user".to_string(),
            parts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CandidateContent {
    pub parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_generate_content_support() {
        let info = ModelInfo {
            name: "models/gemini-pro".to_string(),
            display_name: None,
            supported_generation_methods: vec![
                "countTokens".to_string(),
                "generateContent".to_string(),
            ],
        };
        assert!(info.supports_generate_content());
        assert_eq!(info.short_name(), "gemini-pro");

        let embed = ModelInfo {
            name: "models/embedding-001".to_string(),
            display_name: None,
            supported_generation_methods: vec!["embedContent".to_string()],
        };
        assert!(!embed.supports_generate_content());
    }

    #[test]
    fn test_part_wire_format() {
        let text = serde_json::to_value(Part::Text {
            text: "hola".to_string(),
        })
        .unwrap();
        assert_eq!(text["text"], "hola");

        let file = serde_json::to_value(Part::FileData {
            file_data: FileData {
                mime_type: "application/pdf".to_string(),
                file_uri: "files/abc".to_string(),
            },
        })
        .unwrap();
        assert_eq!(file["fileData"]["mimeType"], "application/pdf");
        assert_eq!(file["fileData"]["fileUri"], "files/abc");
    }
}
