use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assist::prompts::{SUMMARIZE_PERSONA, SUMMARIZE_PROMPT_TEMPLATE};
use crate::assist::{complete, AiError, LanguageModel};
use crate::llm_client::prompts::{json_system, NO_FABRICATION_INSTRUCTION};
use crate::render::suppression::{education_shown, experience_shown, value_shown};
use crate::resume::ResumeDocument;

/// Flattened view of the document sent to the model for a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeInput {
    pub name: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
}

impl SummarizeInput {
    /// Builds the summary input. Rows the preview would hide are skipped so
    /// placeholders never reach the prompt.
    pub fn from_document(doc: &ResumeDocument) -> Self {
        let skills = doc
            .skills
            .iter()
            .filter(|s| value_shown(s))
            .map(|s| s.value.trim())
            .collect::<Vec<_>>()
            .join(", ");

        let education = doc
            .education
            .iter()
            .filter(|e| education_shown(e))
            .map(|e| format!("{} at {}", e.degree.trim(), e.institution.trim()))
            .collect::<Vec<_>>()
            .join("; ");

        let experience = doc
            .experience
            .iter()
            .filter(|e| experience_shown(e))
            .map(|e| {
                format!(
                    "{} at {}: {}",
                    e.title.trim(),
                    e.company.trim(),
                    e.description.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            name: doc.contact.name.trim().to_string(),
            skills,
            education,
            experience,
        }
    }

    fn prompt(&self) -> String {
        SUMMARIZE_PROMPT_TEMPLATE
            .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
            .replace("{name}", &self.name)
            .replace("{skills}", &self.skills)
            .replace("{education}", &self.education)
            .replace("{experience}", &self.experience)
    }
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    summary: String,
}

/// Asks the model for a professional summary of `input`.
pub async fn summarize(model: &dyn LanguageModel, input: &SummarizeInput) -> Result<String, AiError> {
    let reply: SummaryReply =
        complete(model, &input.prompt(), &json_system(SUMMARIZE_PERSONA)).await?;

    let summary = reply.summary.trim();
    if summary.is_empty() {
        return Err(AiError::new("model returned an empty summary"));
    }

    info!(chars = summary.len(), "Generated resume summary");
    Ok(summary.to_string())
}
