//! Suppression rules: whether a section (or a single row) has anything to show.
//!
//! One pure predicate per section tag. The renderer, the export gate and the
//! editor's section status all read this table, so "is this empty" is decided
//! in exactly one place.

use crate::resume::document::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, PublicationEntry,
    ValueEntry,
};
use crate::resume::{ResumeDocument, Section};

pub type SectionPredicate = fn(&ResumeDocument) -> bool;

pub(crate) fn filled(text: &str) -> bool {
    !text.trim().is_empty()
}

// ── row predicates ──────────────────────────────────────────────────────────

pub fn value_shown(entry: &ValueEntry) -> bool {
    filled(&entry.value)
}

/// Dates and description alone never make a row visible.
pub fn experience_shown(entry: &ExperienceEntry) -> bool {
    filled(&entry.title) || filled(&entry.company)
}

pub fn education_shown(entry: &EducationEntry) -> bool {
    filled(&entry.degree) || filled(&entry.institution)
}

pub fn certification_shown(entry: &CertificationEntry) -> bool {
    filled(&entry.name)
}

pub fn project_shown(entry: &ProjectEntry) -> bool {
    filled(&entry.name)
}

pub fn publication_shown(entry: &PublicationEntry) -> bool {
    filled(&entry.title)
}

// ── section predicates ──────────────────────────────────────────────────────

fn contact_has_content(_: &ResumeDocument) -> bool {
    true
}

fn summary_has_content(doc: &ResumeDocument) -> bool {
    filled(&doc.summary)
}

fn skills_has_content(doc: &ResumeDocument) -> bool {
    doc.skills.iter().any(value_shown)
}

fn experience_has_content(doc: &ResumeDocument) -> bool {
    doc.experience.iter().any(experience_shown)
}

fn education_has_content(doc: &ResumeDocument) -> bool {
    doc.education.iter().any(education_shown)
}

fn certifications_has_content(doc: &ResumeDocument) -> bool {
    doc.certifications.iter().any(certification_shown)
}

fn projects_has_content(doc: &ResumeDocument) -> bool {
    doc.projects.iter().any(project_shown)
}

fn achievements_has_content(doc: &ResumeDocument) -> bool {
    doc.achievements.iter().any(value_shown)
}

fn publications_has_content(doc: &ResumeDocument) -> bool {
    doc.publications.iter().any(publication_shown)
}

fn portfolio_has_content(doc: &ResumeDocument) -> bool {
    filled(&doc.portfolio)
}

fn references_has_content(doc: &ResumeDocument) -> bool {
    filled(&doc.references)
}

/// Looks up the predicate for a section tag.
pub fn predicate(section: Section) -> SectionPredicate {
    match section {
        Section::Contact => contact_has_content,
        Section::Summary => summary_has_content,
        Section::Skills => skills_has_content,
        Section::Experience => experience_has_content,
        Section::Education => education_has_content,
        Section::Certifications => certifications_has_content,
        Section::Projects => projects_has_content,
        Section::Achievements => achievements_has_content,
        Section::Publications => publications_has_content,
        Section::Portfolio => portfolio_has_content,
        Section::References => references_has_content,
    }
}

pub fn has_content(section: Section, doc: &ResumeDocument) -> bool {
    predicate(section)(doc)
}
