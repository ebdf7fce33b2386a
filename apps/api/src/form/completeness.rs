use serde::{Deserialize, Serialize};

use crate::catalog::Template;
use crate::render::suppression;
use crate::resume::{ResumeDocument, Section};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Will appear in the preview and export.
    Filled,
    /// Listed by the template but currently suppressed.
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionHealth {
    pub section: Section,
    pub status: SectionStatus,
    /// Editable rows, placeholders included. `None` for scalar sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletenessReport {
    /// Filled sections / listed sections, 0.0 to 1.0.
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub empty_sections: Vec<Section>,
}

/// Reports, for each section the template lists, whether it will render.
/// Uses the same predicates as the renderer so the editor and preview agree.
pub fn compute_completeness_report(template: &Template, doc: &ResumeDocument) -> CompletenessReport {
    let mut sections = Vec::with_capacity(template.sections.len());
    let mut empty_sections = Vec::new();

    for &section in &template.sections {
        let filled = suppression::has_content(section, doc);
        let rows = section.collection().map(|c| doc.rows(c).len());

        let (status, recommendation) = if filled {
            (SectionStatus::Filled, None)
        } else {
            empty_sections.push(section);
            let hint = match section {
                Section::Experience => {
                    "Add a job title or company; dates and description alone are not shown".to_string()
                }
                Section::Education => {
                    "Add a degree or institution; dates alone are not shown".to_string()
                }
                _ => format!("Fill in {} to include it in your resume", section.title()),
            };
            (SectionStatus::Empty, Some(hint))
        };

        sections.push(SectionHealth {
            section,
            status,
            rows,
            recommendation,
        });
    }

    let overall_score = if sections.is_empty() {
        0.0
    } else {
        let filled = sections.len() - empty_sections.len();
        (filled as f64 / sections.len() as f64).clamp(0.0, 1.0)
    };

    CompletenessReport {
        overall_score,
        sections,
        empty_sections,
    }
}
