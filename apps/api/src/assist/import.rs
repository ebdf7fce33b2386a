use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::assist::prompts::{IMPORT_PERSONA, IMPORT_PROMPT_TEMPLATE};
use crate::assist::{AiError, LanguageModel};
use crate::llm_client::prompts::{json_system, NO_FABRICATION_INSTRUCTION};
use crate::resume::document::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, PublicationEntry,
    ValueEntry,
};
use crate::resume::{Collection, DocumentEdit, EditError, FieldPath, ResumeDocument};

/// Partial resume extracted by the model. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportedResume {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<Vec<ValueEntry>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub certifications: Option<Vec<CertificationEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub achievements: Option<Vec<ValueEntry>>,
    pub publications: Option<Vec<PublicationEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub improved_text: String,
    pub json_data: ImportedResume,
}

/// Rewrites raw resume text and extracts structured fields from it.
pub async fn import_resume(model: &dyn LanguageModel, resume_text: &str) -> Result<ImportOutcome, AiError> {
    let prompt = IMPORT_PROMPT_TEMPLATE
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
        .replace("{resume_text}", resume_text);

    let mut reply = model
        .complete_json(&prompt, &json_system(IMPORT_PERSONA))
        .await?;
    // Models emit `null` for unknown fields; treat those as absent.
    strip_nulls(&mut reply);

    let outcome: ImportOutcome = serde_json::from_value(reply)
        .map_err(|e| AiError::new(format!("unexpected reply shape: {e}")))?;

    info!(
        improved_chars = outcome.improved_text.len(),
        has_name = outcome.json_data.name.is_some(),
        "Imported resume text"
    );
    Ok(outcome)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

/// Translates an import into ordinary document edits.
///
/// Present scalars overwrite; absent ones leave the current value alone.
/// Every collection is replaced, and a missing or empty one becomes a single
/// placeholder row so the form stays editable.
pub fn import_edits(imported: &ImportedResume) -> Result<Vec<DocumentEdit>, serde_json::Error> {
    let mut edits = Vec::new();

    let scalars = [
        (FieldPath::Contact("name"), &imported.name),
        (FieldPath::Contact("email"), &imported.email),
        (FieldPath::Contact("phone"), &imported.phone),
        (FieldPath::Contact("website"), &imported.website),
        (FieldPath::Contact("linkedin"), &imported.linkedin),
        (FieldPath::Summary, &imported.summary),
    ];
    for (path, value) in scalars {
        if let Some(value) = value {
            edits.push(DocumentEdit::Set {
                path,
                value: value.clone(),
            });
        }
    }

    edits.push(replace(Collection::Skills, &imported.skills)?);
    edits.push(replace(Collection::Experience, &imported.experience)?);
    edits.push(replace(Collection::Education, &imported.education)?);
    edits.push(replace(Collection::Certifications, &imported.certifications)?);
    edits.push(replace(Collection::Projects, &imported.projects)?);
    edits.push(replace(Collection::Achievements, &imported.achievements)?);
    edits.push(replace(Collection::Publications, &imported.publications)?);

    Ok(edits)
}

fn replace<E: Serialize + Default>(
    collection: Collection,
    rows: &Option<Vec<E>>,
) -> Result<DocumentEdit, serde_json::Error> {
    let entries = match rows {
        Some(rows) if !rows.is_empty() => serde_json::to_value(rows)?,
        _ => serde_json::to_value(vec![E::default()])?,
    };
    Ok(DocumentEdit::Replace {
        collection,
        entries,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyImportError {
    #[error("failed to encode imported rows: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Applies an import to `doc`, returning the new snapshot.
pub fn apply_import(doc: &ResumeDocument, imported: &ImportedResume) -> Result<ResumeDocument, ApplyImportError> {
    let edits = import_edits(imported)?;
    Ok(doc.apply_all(&edits)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::assist::testing::StubModel;
    use crate::catalog::TemplateRegistry;
    use crate::render::render;
    use crate::resume::document::DEFAULT_REFERENCES;
    use crate::resume::Section;

    #[tokio::test]
    async fn test_import_tolerates_nulls_and_missing_fields() {
        let model = StubModel::replying(json!({
            "improved_text": "Grace Hopper\nRear Admiral",
            "json_data": {
                "name": "Grace Hopper",
                "email": null,
                "projects": [{"name": "COBOL", "description": "Language design", "url": null}]
            }
        }));
        let outcome = import_resume(&model, "grace hopper, navy").await.unwrap();
        assert_eq!(outcome.improved_text, "Grace Hopper\nRear Admiral");
        assert_eq!(outcome.json_data.name.as_deref(), Some("Grace Hopper"));
        assert!(outcome.json_data.email.is_none());
        let projects = outcome.json_data.projects.unwrap();
        assert_eq!(projects[0].url, "");
        assert!(model.last_prompt().unwrap().contains("grace hopper, navy"));
    }

    #[tokio::test]
    async fn test_import_drops_null_rows() {
        let model = StubModel::replying(json!({
            "improved_text": "Jane",
            "json_data": {
                "name": "Jane",
                "skills": [null, {"value": "Rust"}],
                "experience": [null]
            }
        }));
        let outcome = import_resume(&model, "jane").await.unwrap();
        assert_eq!(
            outcome.json_data.skills,
            Some(vec![ValueEntry { value: "Rust".into() }])
        );
        assert_eq!(outcome.json_data.experience, Some(vec![]));
    }

    #[tokio::test]
    async fn test_import_requires_improved_text() {
        let model = StubModel::replying(json!({"json_data": {}}));
        assert!(import_resume(&model, "text").await.is_err());
    }

    #[test]
    fn test_apply_import_overwrites_present_and_keeps_absent_scalars() {
        let mut doc = ResumeDocument::default();
        doc.contact.name = "Old Name".into();
        doc.contact.phone = "555-0100".into();
        doc.portfolio = "https://example.com".into();

        let imported = ImportedResume {
            name: Some("New Name".into()),
            summary: Some("Seasoned engineer.".into()),
            ..Default::default()
        };
        let next = apply_import(&doc, &imported).unwrap();
        assert_eq!(next.contact.name, "New Name");
        assert_eq!(next.contact.phone, "555-0100");
        assert_eq!(next.summary, "Seasoned engineer.");
        assert_eq!(next.portfolio, "https://example.com");
        assert_eq!(next.references, DEFAULT_REFERENCES);
    }

    #[test]
    fn test_apply_import_replaces_collections_with_placeholder_fallback() {
        let mut doc = ResumeDocument::default();
        doc.skills = vec![
            ValueEntry { value: "Perl".into() },
            ValueEntry { value: "Tcl".into() },
        ];
        doc.certifications[0].name = "CCNA".into();

        let imported = ImportedResume {
            skills: Some(vec![ValueEntry { value: "Rust".into() }]),
            experience: Some(vec![]),
            ..Default::default()
        };
        let next = apply_import(&doc, &imported).unwrap();
        assert_eq!(next.skills, vec![ValueEntry { value: "Rust".into() }]);
        assert_eq!(next.experience, vec![ExperienceEntry::default()]);
        assert_eq!(next.certifications, vec![CertificationEntry::default()]);
        assert_eq!(next.publications.len(), 1);
    }

    #[test]
    fn test_sparse_import_renders_only_present_sections() {
        let imported = ImportedResume {
            name: Some("Jane Doe".into()),
            skills: Some(vec![ValueEntry { value: "Rust".into() }]),
            ..Default::default()
        };
        let doc = apply_import(&ResumeDocument::default(), &imported).unwrap();
        let present = [Section::Contact, Section::Skills, Section::References];

        let registry = TemplateRegistry::bundled().unwrap();
        for template in registry.list() {
            let rendered = render(template, &doc);
            let emitted: Vec<Section> = rendered.sections.iter().map(|s| s.section).collect();
            let expected: Vec<Section> = template
                .sections
                .iter()
                .copied()
                .filter(|s| present.contains(s))
                .collect();
            assert_eq!(emitted, expected, "{}", template.id);
        }
    }
}
