use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One named category of resume content.
///
/// This is the single vocabulary shared by `ResumeDocument` fields and
/// template declarations. Adding a variant forces every exhaustive match
/// (suppression table, renderer, form schema) to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Achievements,
    Publications,
    Portfolio,
    References,
}

impl Section {
    pub const ALL: [Section; 11] = [
        Section::Contact,
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Certifications,
        Section::Projects,
        Section::Achievements,
        Section::Publications,
        Section::Portfolio,
        Section::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Certifications => "certifications",
            Section::Projects => "projects",
            Section::Achievements => "achievements",
            Section::Publications => "publications",
            Section::Portfolio => "portfolio",
            Section::References => "references",
        }
    }

    /// Heading shown above the section in the preview.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Contact => "Contact",
            Section::Summary => "Summary",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Certifications => "Certifications",
            Section::Projects => "Projects",
            Section::Achievements => "Achievements",
            Section::Publications => "Publications",
            Section::Portfolio => "Portfolio",
            Section::References => "References",
        }
    }

    /// The repeatable collection backing this section, if any.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Section::Skills => Some(Collection::Skills),
            Section::Experience => Some(Collection::Experience),
            Section::Education => Some(Collection::Education),
            Section::Certifications => Some(Collection::Certifications),
            Section::Projects => Some(Collection::Projects),
            Section::Achievements => Some(Collection::Achievements),
            Section::Publications => Some(Collection::Publications),
            Section::Contact | Section::Summary | Section::Portfolio | Section::References => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Sections whose content is an ordered list of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Achievements,
    Publications,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Skills,
        Collection::Experience,
        Collection::Education,
        Collection::Certifications,
        Collection::Projects,
        Collection::Achievements,
        Collection::Publications,
    ];

    pub fn section(&self) -> Section {
        match self {
            Collection::Skills => Section::Skills,
            Collection::Experience => Section::Experience,
            Collection::Education => Section::Education,
            Collection::Certifications => Section::Certifications,
            Collection::Projects => Section::Projects,
            Collection::Achievements => Section::Achievements,
            Collection::Publications => Section::Publications,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.section().as_str()
    }

    /// Editable fields of one row, in form order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Skills | Collection::Achievements => &["value"],
            Collection::Experience => &["title", "company", "dates", "description"],
            Collection::Education => &["degree", "institution", "dates"],
            Collection::Certifications => &["name", "source"],
            Collection::Projects => &["name", "description", "url"],
            Collection::Publications => &["title", "url"],
        }
    }
}

impl FromStr for Collection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_str(s)?
            .collection()
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
