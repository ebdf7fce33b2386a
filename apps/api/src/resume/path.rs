use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::resume::document::Contact;
use crate::resume::section::Collection;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("malformed field path '{0}'")]
    Malformed(String),

    #[error("unknown field '{field}' in '{path}'")]
    UnknownField { path: String, field: String },

    #[error("row {index} does not exist in {collection} (len {len})")]
    OutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

/// Address of one editable string in a `ResumeDocument`.
///
/// Textual forms: `contact.email`, `summary`, `portfolio`, `references`,
/// `experience[2].title`. The dotted-index form `experience.2.title` is
/// accepted on input; `Display` always emits the bracket form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Contact(&'static str),
    Summary,
    Portfolio,
    References,
    Row {
        collection: Collection,
        index: usize,
        field: &'static str,
    },
}

impl FieldPath {
    pub fn row(collection: Collection, index: usize, field: &str) -> Result<Self, PathError> {
        let field = collection
            .fields()
            .iter()
            .copied()
            .find(|f| *f == field)
            .ok_or_else(|| PathError::UnknownField {
                path: format!("{}[{index}].{field}", collection.as_str()),
                field: field.to_string(),
            })?;
        Ok(FieldPath::Row {
            collection,
            index,
            field,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Contact(field) => write!(f, "contact.{field}"),
            FieldPath::Summary => f.write_str("summary"),
            FieldPath::Portfolio => f.write_str("portfolio"),
            FieldPath::References => f.write_str("references"),
            FieldPath::Row {
                collection,
                index,
                field,
            } => write!(f, "{}[{index}].{field}", collection.as_str()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let path = raw.trim();
        let malformed = || PathError::Malformed(raw.to_string());

        match path {
            "summary" => return Ok(FieldPath::Summary),
            "portfolio" => return Ok(FieldPath::Portfolio),
            "references" => return Ok(FieldPath::References),
            _ => {}
        }

        if let Some(field) = path.strip_prefix("contact.") {
            return Contact::FIELDS
                .iter()
                .copied()
                .find(|f| *f == field)
                .map(FieldPath::Contact)
                .ok_or_else(|| PathError::UnknownField {
                    path: raw.to_string(),
                    field: field.to_string(),
                });
        }

        // `experience[2].title` or `experience.2.title`
        let (head, field) = path.rsplit_once('.').ok_or_else(malformed)?;
        let (name, index) = if let Some(open) = head.find('[') {
            let index = head[open + 1..].strip_suffix(']').ok_or_else(malformed)?;
            (&head[..open], index)
        } else {
            head.split_once('.').ok_or_else(malformed)?
        };

        let collection = name.parse::<Collection>().map_err(|_| malformed())?;
        let index = index.parse::<usize>().map_err(|_| malformed())?;
        FieldPath::row(collection, index, field)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
