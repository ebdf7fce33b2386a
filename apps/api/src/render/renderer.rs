//! Section Renderer: maps (template, document snapshot) to ordered render
//! instructions for the live preview and the exported artifact.
//!
//! Pure: no I/O, no clock, no randomness. Rendering never fails; absent or
//! blank content degrades to "not rendered".

use serde::Serialize;

use crate::catalog::Template;
use crate::render::suppression::{
    self, certification_shown, education_shown, experience_shown, filled, project_shown,
    publication_shown, value_shown,
};
use crate::resume::{ResumeDocument, Section};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const SKILL_DELIMITER: &str = " • ";

const BULLET_GLYPHS: [char; 2] = ['•', '-'];

// ────────────────────────────────────────────────────────────────────────────
// Render instructions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResume {
    pub template_id: String,
    pub sections: Vec<RenderedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub section: Section,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Header {
        name: String,
        /// Email, phone, website, linkedin; blanks dropped.
        details: Vec<String>,
    },
    Paragraph {
        text: String,
    },
    /// Single line, items joined by `delimiter`.
    Inline {
        items: Vec<String>,
        delimiter: &'static str,
    },
    Bullets {
        items: Vec<String>,
    },
    Experience {
        entries: Vec<ExperienceBlock>,
    },
    Education {
        entries: Vec<EducationBlock>,
    },
    Certifications {
        entries: Vec<CertificationBlock>,
    },
    Projects {
        entries: Vec<ProjectBlock>,
    },
    Publications {
        entries: Vec<PublicationBlock>,
    },
    Link {
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBlock {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBlock {
    pub degree: String,
    pub institution: String,
    pub dates: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationBlock {
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBlock {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationBlock {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders `doc` through `template`, emitting sections in the template's
/// declared order and skipping every section whose predicate is false.
pub fn render(template: &Template, doc: &ResumeDocument) -> RenderedResume {
    let sections = template
        .sections
        .iter()
        .copied()
        .filter(|section| suppression::has_content(*section, doc))
        .map(|section| RenderedSection {
            section,
            title: section.title(),
            body: render_body(section, doc),
        })
        .collect();

    RenderedResume {
        template_id: template.id.clone(),
        sections,
    }
}

fn render_body(section: Section, doc: &ResumeDocument) -> SectionBody {
    match section {
        Section::Contact => {
            let contact = &doc.contact;
            let name = if filled(&contact.name) {
                contact.name.trim().to_string()
            } else {
                NAME_PLACEHOLDER.to_string()
            };
            let details = [&contact.email, &contact.phone, &contact.website, &contact.linkedin]
                .into_iter()
                .filter(|v| filled(v))
                .map(|v| v.trim().to_string())
                .collect();
            SectionBody::Header { name, details }
        }
        Section::Summary => SectionBody::Paragraph {
            text: doc.summary.trim().to_string(),
        },
        Section::References => SectionBody::Paragraph {
            text: doc.references.trim().to_string(),
        },
        Section::Skills => SectionBody::Inline {
            items: doc
                .skills
                .iter()
                .filter(|e| value_shown(e))
                .map(|e| e.value.trim().to_string())
                .collect(),
            delimiter: SKILL_DELIMITER,
        },
        Section::Achievements => SectionBody::Bullets {
            items: doc
                .achievements
                .iter()
                .filter(|e| value_shown(e))
                .map(|e| e.value.trim().to_string())
                .collect(),
        },
        Section::Experience => SectionBody::Experience {
            entries: doc
                .experience
                .iter()
                .filter(|e| experience_shown(e))
                .map(|e| ExperienceBlock {
                    title: e.title.trim().to_string(),
                    company: e.company.trim().to_string(),
                    dates: e.dates.trim().to_string(),
                    bullets: split_bullets(&e.description),
                })
                .collect(),
        },
        Section::Education => SectionBody::Education {
            entries: doc
                .education
                .iter()
                .filter(|e| education_shown(e))
                .map(|e| EducationBlock {
                    degree: e.degree.trim().to_string(),
                    institution: e.institution.trim().to_string(),
                    dates: e.dates.trim().to_string(),
                })
                .collect(),
        },
        Section::Certifications => SectionBody::Certifications {
            entries: doc
                .certifications
                .iter()
                .filter(|e| certification_shown(e))
                .map(|e| CertificationBlock {
                    name: e.name.trim().to_string(),
                    source: e.source.trim().to_string(),
                })
                .collect(),
        },
        Section::Projects => SectionBody::Projects {
            entries: doc
                .projects
                .iter()
                .filter(|e| project_shown(e))
                .map(|e| ProjectBlock {
                    name: e.name.trim().to_string(),
                    description: e.description.trim().to_string(),
                    url: non_blank(&e.url),
                })
                .collect(),
        },
        Section::Publications => SectionBody::Publications {
            entries: doc
                .publications
                .iter()
                .filter(|e| publication_shown(e))
                .map(|e| PublicationBlock {
                    title: e.title.trim().to_string(),
                    url: non_blank(&e.url),
                })
                .collect(),
        },
        Section::Portfolio => SectionBody::Link {
            url: doc.portfolio.trim().to_string(),
        },
    }
}

/// Splits a description into display bullets: one per non-blank line, with a
/// single leading `•` or `-` glyph removed.
pub fn split_bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .map(|line| {
            line.strip_prefix(BULLET_GLYPHS)
                .map(str::trim_start)
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn non_blank(text: &str) -> Option<String> {
    filled(text).then(|| text.trim().to_string())
}
