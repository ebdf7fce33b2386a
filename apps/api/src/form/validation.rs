use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::render::suppression;
use crate::resume::{Collection, FieldPath, ResumeDocument, Section};

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_URL: &str = "Invalid URL";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

/// Constraint attached to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Must contain non-whitespace text.
    Required,
    /// Required, and must look like an email address.
    Email,
    /// Empty, or an absolute http(s) URL.
    OptionalUrl,
    FreeText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in your name and at least one experience entry to generate a summary.")]
pub struct MissingInformation;

/// The form schema: which constraint guards which field.
pub fn constraint_for(path: &FieldPath) -> FieldConstraint {
    match path {
        FieldPath::Contact("name") => FieldConstraint::Required,
        FieldPath::Contact("email") => FieldConstraint::Email,
        FieldPath::Contact("website") | FieldPath::Contact("linkedin") => {
            FieldConstraint::OptionalUrl
        }
        FieldPath::Portfolio => FieldConstraint::OptionalUrl,
        FieldPath::Row {
            collection: Collection::Projects | Collection::Publications,
            field: "url",
            ..
        } => FieldConstraint::OptionalUrl,
        _ => FieldConstraint::FreeText,
    }
}

/// Checks a single value against its field's constraint.
pub fn validate_field(path: &FieldPath, value: &str) -> Option<FieldError> {
    let message = match constraint_for(path) {
        FieldConstraint::Required if value.trim().is_empty() => NAME_REQUIRED,
        FieldConstraint::Email if !is_email(value) => INVALID_EMAIL,
        FieldConstraint::OptionalUrl if !value.trim().is_empty() && !is_url(value) => INVALID_URL,
        _ => return None,
    };
    Some(FieldError {
        path: path.to_string(),
        message: message.to_string(),
    })
}

/// Validates every constrained field of the document.
pub fn validate_document(doc: &ResumeDocument) -> ValidationReport {
    let mut errors = Vec::new();
    let mut check = |path: FieldPath| {
        if let Ok(value) = doc.get(&path) {
            if let Some(error) = validate_field(&path, value) {
                errors.push(error);
            }
        }
    };

    for field in ["name", "email", "website", "linkedin"] {
        check(FieldPath::Contact(field));
    }
    for collection in Collection::ALL {
        for index in 0..doc.rows(collection).len() {
            for &field in collection.fields() {
                check(FieldPath::Row {
                    collection,
                    index,
                    field,
                });
            }
        }
    }
    check(FieldPath::Portfolio);

    ValidationReport::from_errors(errors)
}

/// AI summary needs a name and at least one experience row with a title or
/// company; otherwise the adapter must not be called.
pub fn check_summary_prerequisites(doc: &ResumeDocument) -> Result<(), MissingInformation> {
    let has_name = !doc.contact.name.trim().is_empty();
    let has_experience = suppression::has_content(Section::Experience, doc);
    if has_name && has_experience {
        Ok(())
    } else {
        Err(MissingInformation)
    }
}

fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn is_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> FieldPath {
        raw.parse().unwrap()
    }

    fn error_for<'a>(report: &'a ValidationReport, path: &str) -> Option<&'a str> {
        report
            .errors
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }

    fn valid_document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.contact.name = "Jane Doe".into();
        doc.contact.email = "jane@example.com".into();
        doc
    }

    #[test]
    fn test_schema_constraints() {
        assert_eq!(constraint_for(&path("contact.name")), FieldConstraint::Required);
        assert_eq!(constraint_for(&path("contact.email")), FieldConstraint::Email);
        assert_eq!(constraint_for(&path("contact.phone")), FieldConstraint::FreeText);
        assert_eq!(constraint_for(&path("portfolio")), FieldConstraint::OptionalUrl);
        assert_eq!(constraint_for(&path("projects[3].url")), FieldConstraint::OptionalUrl);
        assert_eq!(constraint_for(&path("publications[0].url")), FieldConstraint::OptionalUrl);
        assert_eq!(constraint_for(&path("projects[0].name")), FieldConstraint::FreeText);
        assert_eq!(constraint_for(&path("summary")), FieldConstraint::FreeText);
    }

    #[test]
    fn test_name_required() {
        let err = validate_field(&path("contact.name"), "  ").unwrap();
        assert_eq!(err.message, NAME_REQUIRED);
        assert_eq!(err.path, "contact.name");
        assert!(validate_field(&path("contact.name"), "Jane").is_none());
    }

    #[test]
    fn test_email_format() {
        for bad in ["", "jane", "jane@", "@example.com", "jane@example", "ja ne@example.com"] {
            assert_eq!(
                validate_field(&path("contact.email"), bad).unwrap().message,
                INVALID_EMAIL,
                "{bad}"
            );
        }
        for good in ["jane@example.com", "j.doe+cv@mail.example.co.uk"] {
            assert!(validate_field(&path("contact.email"), good).is_none(), "{good}");
        }
    }

    #[test]
    fn test_optional_url_accepts_empty_or_absolute() {
        let p = path("contact.website");
        assert!(validate_field(&p, "").is_none());
        assert!(validate_field(&p, "https://jane.dev").is_none());
        assert!(validate_field(&p, "http://localhost:3000/cv").is_none());
        for bad in ["jane.dev", "linkedin.com/in/jane", "javascript:alert(1)", "https://"] {
            assert_eq!(validate_field(&p, bad).unwrap().message, INVALID_URL, "{bad}");
        }
    }

    #[test]
    fn test_free_text_never_fails() {
        assert!(validate_field(&path("experience[0].description"), "").is_none());
        assert!(validate_field(&path("summary"), "anything").is_none());
    }

    #[test]
    fn test_validate_document_collects_all_errors() {
        let mut doc = ResumeDocument::default();
        doc.contact.linkedin = "not a url".into();
        doc.projects[0].url = "ftp:/broken".into();
        doc.publications[0].url = "https://example.com/p".into();
        let report = validate_document(&doc);
        assert!(!report.valid);
        assert_eq!(error_for(&report, "contact.name"), Some(NAME_REQUIRED));
        assert_eq!(error_for(&report, "contact.email"), Some(INVALID_EMAIL));
        assert_eq!(error_for(&report, "contact.linkedin"), Some(INVALID_URL));
        assert_eq!(error_for(&report, "projects[0].url"), Some(INVALID_URL));
        assert_eq!(error_for(&report, "publications[0].url"), None);
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_validate_document_passes_for_minimal_valid_document() {
        let report = validate_document(&valid_document());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_summary_gate_allows_name_and_experience() {
        let mut doc = valid_document();
        doc.experience[0].title = "Engineer".into();
        doc.experience[0].company = "Acme".into();
        assert!(doc.summary.is_empty());
        assert!(check_summary_prerequisites(&doc).is_ok());
    }

    #[test]
    fn test_summary_gate_blocks_missing_name() {
        let mut doc = valid_document();
        doc.contact.name.clear();
        doc.experience[0].title = "Engineer".into();
        assert_eq!(check_summary_prerequisites(&doc), Err(MissingInformation));
    }

    #[test]
    fn test_summary_gate_blocks_description_only_experience() {
        let mut doc = valid_document();
        doc.experience[0].description = "Did things".into();
        assert_eq!(check_summary_prerequisites(&doc), Err(MissingInformation));
    }
}
