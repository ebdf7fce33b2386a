//! Template Registry: the static catalog of presentation templates.
//!
//! Loaded once at startup from the bundled `templates.json`. Every structural
//! rule (known section tags, a positive price on paid templates, unique ids) is checked
//! here, so the renderer never sees a malformed template.

pub mod handlers;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resume::Section;

const BUNDLED_CATALOG: &str = include_str!("templates.json");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate template id '{0}'")]
    DuplicateId(String),

    #[error("template '{template}' references unknown section tag '{tag}'")]
    UnknownSection { template: String, tag: String },

    #[error("template '{template}' lists section '{section}' more than once")]
    DuplicateSection { template: String, section: Section },

    #[error("template '{0}' does not include the contact section")]
    MissingContact(String),

    #[error("paid template '{0}' must have a positive price")]
    MissingPrice(String),

    #[error("free template '{0}' must not carry a price")]
    UnexpectedPrice(String),

    #[error("template '{template}' has an invalid preview image URL '{url}'")]
    InvalidImage { template: String, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Paid,
}

/// An immutable, validated template declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Preview thumbnail shown on the catalog card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    pub sections: Vec<Section>,
}

impl Template {
    pub fn is_paid(&self) -> bool {
        self.tier == Tier::Paid
    }
}

/// Catalog record as written in JSON; section tags are still strings.
#[derive(Debug, Deserialize)]
struct RawTemplate {
    id: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    tier: Tier,
    price: Option<u32>,
    sections: Vec<String>,
}

impl TryFrom<RawTemplate> for Template {
    type Error = RegistryError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let mut sections = Vec::with_capacity(raw.sections.len());
        for tag in &raw.sections {
            let section = tag
                .parse::<Section>()
                .map_err(|_| RegistryError::UnknownSection {
                    template: raw.id.clone(),
                    tag: tag.clone(),
                })?;
            if sections.contains(&section) {
                return Err(RegistryError::DuplicateSection {
                    template: raw.id.clone(),
                    section,
                });
            }
            sections.push(section);
        }

        if !sections.contains(&Section::Contact) {
            return Err(RegistryError::MissingContact(raw.id));
        }

        match (raw.tier, raw.price) {
            (Tier::Paid, None | Some(0)) => return Err(RegistryError::MissingPrice(raw.id)),
            (Tier::Free, Some(_)) => return Err(RegistryError::UnexpectedPrice(raw.id)),
            _ => {}
        }

        if let Some(url) = &raw.image {
            let valid = url::Url::parse(url)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                .unwrap_or(false);
            if !valid {
                return Err(RegistryError::InvalidImage {
                    template: raw.id,
                    url: url.clone(),
                });
            }
        }

        Ok(Template {
            id: raw.id,
            name: raw.name,
            image: raw.image,
            tier: raw.tier,
            price: raw.price,
            sections,
        })
    }
}

/// Read-only, ordered template catalog.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Loads the catalog compiled into the binary.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: Vec<RawTemplate> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut templates = Vec::with_capacity(raw.len());
        for record in raw {
            if !seen.insert(record.id.clone()) {
                return Err(RegistryError::DuplicateId(record.id));
            }
            templates.push(Template::try_from(record)?);
        }
        Ok(Self { templates })
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let registry = TemplateRegistry::bundled().unwrap();
        assert_eq!(registry.list().len(), 8);
        assert_eq!(registry.list()[0].id, "classic-free");
        for template in registry.list() {
            assert_eq!(template.sections[0], Section::Contact, "{}", template.id);
            assert_eq!(template.is_paid(), template.price.is_some());
            assert!(template.image.is_some(), "{}", template.id);
        }
    }

    #[test]
    fn test_get_by_id() {
        let registry = TemplateRegistry::bundled().unwrap();
        let tech = registry.get("tech-paid").unwrap();
        assert_eq!(tech.price, Some(49));
        assert!(tech.sections.contains(&Section::Publications));
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_unknown_section_is_a_load_error() {
        let err = TemplateRegistry::from_json(
            r#"[{"id": "x", "name": "X", "tier": "free", "sections": ["contact", "hobbies"]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSection { tag, .. } if tag == "hobbies"));
    }

    #[test]
    fn test_paid_template_requires_positive_price() {
        for price in ["", r#", "price": 0"#] {
            let json = format!(
                r#"[{{"id": "p", "name": "P", "tier": "paid"{price}, "sections": ["contact"]}}]"#
            );
            assert!(matches!(
                TemplateRegistry::from_json(&json),
                Err(RegistryError::MissingPrice(_))
            ));
        }
    }

    #[test]
    fn test_free_template_with_price_is_rejected() {
        let err = TemplateRegistry::from_json(
            r#"[{"id": "f", "name": "F", "tier": "free", "price": 5, "sections": ["contact"]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::UnexpectedPrice(_)));
    }

    #[test]
    fn test_duplicate_ids_and_sections_are_rejected() {
        let dup_id = r#"[
            {"id": "a", "name": "A", "tier": "free", "sections": ["contact"]},
            {"id": "a", "name": "B", "tier": "free", "sections": ["contact"]}
        ]"#;
        assert!(matches!(
            TemplateRegistry::from_json(dup_id),
            Err(RegistryError::DuplicateId(_))
        ));

        let dup_section =
            r#"[{"id": "a", "name": "A", "tier": "free", "sections": ["contact", "skills", "skills"]}]"#;
        assert!(matches!(
            TemplateRegistry::from_json(dup_section),
            Err(RegistryError::DuplicateSection { section: Section::Skills, .. })
        ));
    }

    #[test]
    fn test_template_without_contact_is_rejected() {
        let err = TemplateRegistry::from_json(
            r#"[{"id": "a", "name": "A", "tier": "free", "sections": ["summary"]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::MissingContact(_)));
    }

    #[test]
    fn test_image_is_optional_but_must_be_a_web_url() {
        let registry = TemplateRegistry::from_json(
            r#"[{"id": "a", "name": "A", "tier": "free", "sections": ["contact"]}]"#,
        )
        .unwrap();
        assert!(registry.list()[0].image.is_none());
        let card = serde_json::to_value(&registry.list()[0]).unwrap();
        assert!(card.get("image").is_none());

        let err = TemplateRegistry::from_json(
            r#"[{"id": "a", "name": "A", "image": "thumb.png", "tier": "free", "sections": ["contact"]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidImage { url, .. } if url == "thumb.png"));
    }
}
