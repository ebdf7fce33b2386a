use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::resume::section::{Collection, Section};

pub const DEFAULT_REFERENCES: &str = "Available upon request.";

// ────────────────────────────────────────────────────────────────────────────
// Rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub linkedin: String,
}

impl Contact {
    pub const FIELDS: [&'static str; 5] = ["name", "email", "phone", "website", "linkedin"];

    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "website" => Some(&self.website),
            "linkedin" => Some(&self.linkedin),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "website" => Some(&mut self.website),
            "linkedin" => Some(&mut self.linkedin),
            _ => None,
        }
    }
}

/// A single skill or achievement line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueEntry {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    /// One bullet point per line.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationEntry {
    pub title: String,
    pub url: String,
}

/// A row type that lives in one of the document's collections.
pub trait Entry: Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn field(&self, name: &str) -> Option<&str>;
    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

impl Entry for ValueEntry {
    fn field(&self, name: &str) -> Option<&str> {
        (name == "value").then_some(self.value.as_str())
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        (name == "value").then_some(&mut self.value)
    }
}

impl Entry for ExperienceEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "dates" => Some(&self.dates),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "company" => Some(&mut self.company),
            "dates" => Some(&mut self.dates),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

impl Entry for EducationEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "degree" => Some(&self.degree),
            "institution" => Some(&self.institution),
            "dates" => Some(&self.dates),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "degree" => Some(&mut self.degree),
            "institution" => Some(&mut self.institution),
            "dates" => Some(&mut self.dates),
            _ => None,
        }
    }
}

impl Entry for CertificationEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "source" => Some(&self.source),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "source" => Some(&mut self.source),
            _ => None,
        }
    }
}

impl Entry for ProjectEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "url" => Some(&self.url),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "description" => Some(&mut self.description),
            "url" => Some(&mut self.url),
            _ => None,
        }
    }
}

impl Entry for PublicationEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "url" => Some(&self.url),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "url" => Some(&mut self.url),
            _ => None,
        }
    }
}

/// Object-safe view over one collection, so edits can address any
/// collection by its `Collection` tag.
pub trait RowList {
    fn len(&self) -> usize;
    fn field(&self, index: usize, name: &str) -> Option<&str>;
    fn field_mut(&mut self, index: usize, name: &str) -> Option<&mut String>;
    fn push_placeholder(&mut self);
    fn remove_row(&mut self, index: usize) -> bool;
    fn replace_from_json(&mut self, rows: serde_json::Value) -> Result<(), serde_json::Error>;
}

impl<E: Entry> RowList for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn field(&self, index: usize, name: &str) -> Option<&str> {
        self.get(index).and_then(|row| row.field(name))
    }

    fn field_mut(&mut self, index: usize, name: &str) -> Option<&mut String> {
        self.get_mut(index).and_then(|row| row.field_mut(name))
    }

    fn push_placeholder(&mut self) {
        self.push(E::default());
    }

    fn remove_row(&mut self, index: usize) -> bool {
        if index < Vec::len(self) {
            self.remove(index);
            true
        } else {
            false
        }
    }

    fn replace_from_json(&mut self, rows: serde_json::Value) -> Result<(), serde_json::Error> {
        *self = serde_json::from_value(rows)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Template-independent resume content for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub contact: Contact,
    pub summary: String,
    pub skills: Vec<ValueEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub achievements: Vec<ValueEntry>,
    pub publications: Vec<PublicationEntry>,
    pub portfolio: String,
    pub references: String,
}

impl Default for ResumeDocument {
    /// The blank editor form: one placeholder row per collection.
    fn default() -> Self {
        Self {
            contact: Contact::default(),
            summary: String::new(),
            skills: vec![ValueEntry::default()],
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            certifications: vec![CertificationEntry::default()],
            projects: vec![ProjectEntry::default()],
            achievements: vec![ValueEntry::default()],
            publications: vec![PublicationEntry::default()],
            portfolio: String::new(),
            references: DEFAULT_REFERENCES.to_string(),
        }
    }
}

impl ResumeDocument {
    pub fn rows(&self, collection: Collection) -> &dyn RowList {
        match collection {
            Collection::Skills => &self.skills,
            Collection::Experience => &self.experience,
            Collection::Education => &self.education,
            Collection::Certifications => &self.certifications,
            Collection::Projects => &self.projects,
            Collection::Achievements => &self.achievements,
            Collection::Publications => &self.publications,
        }
    }

    pub fn rows_mut(&mut self, collection: Collection) -> &mut dyn RowList {
        match collection {
            Collection::Skills => &mut self.skills,
            Collection::Experience => &mut self.experience,
            Collection::Education => &mut self.education,
            Collection::Certifications => &mut self.certifications,
            Collection::Projects => &mut self.projects,
            Collection::Achievements => &mut self.achievements,
            Collection::Publications => &mut self.publications,
        }
    }

    pub(crate) fn contact_field_mut(&mut self, name: &str) -> Option<&mut String> {
        self.contact.field_mut(name)
    }

    /// Returns a copy in which every listed collection section has at least
    /// one editable row.
    pub fn with_placeholders(&self, sections: &[Section]) -> Self {
        let mut doc = self.clone();
        for collection in sections.iter().filter_map(Section::collection) {
            let rows = doc.rows_mut(collection);
            if rows.len() == 0 {
                rows.push_placeholder();
            }
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_one_placeholder_per_collection() {
        let doc = ResumeDocument::default();
        for collection in Collection::ALL {
            assert_eq!(doc.rows(collection).len(), 1, "{collection:?}");
        }
        assert_eq!(doc.references, DEFAULT_REFERENCES);
        assert!(doc.summary.is_empty());
    }

    #[test]
    fn test_with_placeholders_only_fills_listed_empty_sections() {
        let mut doc = ResumeDocument::default();
        doc.skills.clear();
        doc.projects.clear();
        let seeded = doc.with_placeholders(&[Section::Contact, Section::Skills]);
        assert_eq!(seeded.skills.len(), 1);
        assert!(seeded.projects.is_empty());
        // Source snapshot is untouched.
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_with_placeholders_keeps_existing_rows() {
        let mut doc = ResumeDocument::default();
        doc.skills = vec![
            ValueEntry { value: "Rust".into() },
            ValueEntry { value: "SQL".into() },
        ];
        let seeded = doc.with_placeholders(&[Section::Skills]);
        assert_eq!(seeded.skills.len(), 2);
    }

    #[test]
    fn test_row_list_field_access_by_name() {
        let mut doc = ResumeDocument::default();
        *doc.rows_mut(Collection::Experience).field_mut(0, "company").unwrap() = "Acme".into();
        assert_eq!(doc.experience[0].company, "Acme");
        assert_eq!(doc.rows(Collection::Experience).field(0, "company"), Some("Acme"));
        assert!(doc.rows(Collection::Experience).field(0, "salary").is_none());
        assert!(doc.rows(Collection::Experience).field(3, "title").is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"contact": {"name": "Jane Doe"}, "skills": []}"#).unwrap();
        assert_eq!(doc.contact.name, "Jane Doe");
        assert!(doc.contact.email.is_empty());
        assert!(doc.skills.is_empty());
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.references, DEFAULT_REFERENCES);
    }
}
