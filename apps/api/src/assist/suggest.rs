use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assist::prompts::{SUGGEST_PERSONA, SUGGEST_PROMPT_TEMPLATE};
use crate::assist::{complete, AiError, LanguageModel};
use crate::llm_client::prompts::json_system;

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRequest {
    pub job_title: String,
    pub industry: String,
}

/// Content ideas for a target role. Lists the model leaves out come back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestions {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
}

impl Suggestions {
    fn cleaned(self) -> Self {
        fn clean(items: Vec<String>) -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }
        Self {
            skills: clean(self.skills),
            education: clean(self.education),
            experience: clean(self.experience),
        }
    }
}

pub async fn suggest(model: &dyn LanguageModel, request: &SuggestRequest) -> Result<Suggestions, AiError> {
    let prompt = SUGGEST_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title.trim())
        .replace("{industry}", request.industry.trim());

    let reply: Suggestions = complete(model, &prompt, &json_system(SUGGEST_PERSONA)).await?;
    let suggestions = reply.cleaned();

    info!(
        job_title = %request.job_title,
        skills = suggestions.skills.len(),
        education = suggestions.education.len(),
        experience = suggestions.experience.len(),
        "Generated content suggestions"
    );
    Ok(suggestions)
}
