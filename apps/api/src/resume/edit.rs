//! Mutation surface of the resume data model.
//!
//! Every edit produces a new snapshot; a batch is applied to a private copy
//! and only returned when every edit in it succeeded. Content is never
//! validated here (see `form::validation`); only addressing can fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resume::document::ResumeDocument;
use crate::resume::path::{FieldPath, PathError};
use crate::resume::section::Collection;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("invalid rows for {collection}: {source}")]
    InvalidRows {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentEdit {
    /// Overwrites one string field.
    Set { path: FieldPath, value: String },
    /// Adds an empty row at the end of a collection.
    Append { collection: Collection },
    /// Removes one row; the remaining rows keep their order.
    Remove { collection: Collection, index: usize },
    /// Replaces a whole collection (used by AI import).
    Replace {
        collection: Collection,
        entries: serde_json::Value,
    },
}

impl ResumeDocument {
    /// Applies one edit and returns the resulting snapshot.
    pub fn apply(&self, edit: &DocumentEdit) -> Result<ResumeDocument, EditError> {
        let mut next = self.clone();
        next.apply_in_place(edit)?;
        Ok(next)
    }

    /// Applies a batch atomically: on error no edit is visible.
    pub fn apply_all(&self, edits: &[DocumentEdit]) -> Result<ResumeDocument, EditError> {
        let mut next = self.clone();
        for edit in edits {
            next.apply_in_place(edit)?;
        }
        Ok(next)
    }

    pub fn get(&self, path: &FieldPath) -> Result<&str, PathError> {
        match path {
            FieldPath::Contact(field) => Ok(self.contact.field(field).unwrap_or_default()),
            FieldPath::Summary => Ok(&self.summary),
            FieldPath::Portfolio => Ok(&self.portfolio),
            FieldPath::References => Ok(&self.references),
            FieldPath::Row {
                collection,
                index,
                field,
            } => {
                let rows = self.rows(*collection);
                rows.field(*index, field).ok_or(PathError::OutOfRange {
                    collection: collection.as_str(),
                    index: *index,
                    len: rows.len(),
                })
            }
        }
    }

    fn apply_in_place(&mut self, edit: &DocumentEdit) -> Result<(), EditError> {
        match edit {
            DocumentEdit::Set { path, value } => {
                *self.slot_mut(path)? = value.clone();
            }
            DocumentEdit::Append { collection } => {
                self.rows_mut(*collection).push_placeholder();
            }
            DocumentEdit::Remove { collection, index } => {
                let rows = self.rows_mut(*collection);
                let len = rows.len();
                if !rows.remove_row(*index) {
                    return Err(PathError::OutOfRange {
                        collection: collection.as_str(),
                        index: *index,
                        len,
                    }
                    .into());
                }
            }
            DocumentEdit::Replace {
                collection,
                entries,
            } => {
                self.rows_mut(*collection)
                    .replace_from_json(entries.clone())
                    .map_err(|source| EditError::InvalidRows {
                        collection: collection.as_str(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, path: &FieldPath) -> Result<&mut String, PathError> {
        match path {
            FieldPath::Contact(field) => {
                self.contact_field_mut(field)
                    .ok_or_else(|| PathError::UnknownField {
                        path: path.to_string(),
                        field: field.to_string(),
                    })
            }
            FieldPath::Summary => Ok(&mut self.summary),
            FieldPath::Portfolio => Ok(&mut self.portfolio),
            FieldPath::References => Ok(&mut self.references),
            FieldPath::Row {
                collection,
                index,
                field,
            } => {
                let rows = self.rows_mut(*collection);
                let len = rows.len();
                rows.field_mut(*index, field).ok_or(PathError::OutOfRange {
                    collection: collection.as_str(),
                    index: *index,
                    len,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(path: &str, value: &str) -> DocumentEdit {
        DocumentEdit::Set {
            path: path.parse().unwrap(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_set_produces_new_snapshot() {
        let doc = ResumeDocument::default();
        let next = doc.apply(&set("experience[0].title", "Engineer")).unwrap();
        assert_eq!(next.experience[0].title, "Engineer");
        assert!(doc.experience[0].title.is_empty());
    }

    #[test]
    fn test_set_accepts_any_content() {
        let doc = ResumeDocument::default();
        let next = doc
            .apply_all(&[set("contact.email", "not an email"), set("summary", "   ")])
            .unwrap();
        assert_eq!(next.contact.email, "not an email");
        assert_eq!(next.summary, "   ");
    }

    #[test]
    fn test_set_out_of_range_fails() {
        let doc = ResumeDocument::default();
        let err = doc.apply(&set("skills[4].value", "Go")).unwrap_err();
        assert!(matches!(
            err,
            EditError::Path(PathError::OutOfRange { index: 4, len: 1, .. })
        ));
    }

    #[test]
    fn test_append_then_set_then_remove() {
        let doc = ResumeDocument::default();
        let next = doc
            .apply_all(&[
                DocumentEdit::Append {
                    collection: Collection::Skills,
                },
                set("skills[0].value", "Rust"),
                set("skills[1].value", "Go"),
                DocumentEdit::Remove {
                    collection: Collection::Skills,
                    index: 0,
                },
            ])
            .unwrap();
        assert_eq!(next.skills.len(), 1);
        assert_eq!(next.skills[0].value, "Go");
    }

    #[test]
    fn test_failed_batch_leaves_no_partial_write() {
        let doc = ResumeDocument::default();
        let result = doc.apply_all(&[
            set("contact.name", "Jane"),
            DocumentEdit::Remove {
                collection: Collection::Projects,
                index: 9,
            },
        ]);
        assert!(result.is_err());
        assert!(doc.contact.name.is_empty());
    }

    #[test]
    fn test_replace_whole_collection() {
        let doc = ResumeDocument::default();
        let next = doc
            .apply(&DocumentEdit::Replace {
                collection: Collection::Education,
                entries: json!([
                    {"degree": "BSc", "institution": "MIT", "dates": "2016 - 2020"},
                    {"degree": "MSc", "institution": "ETH"}
                ]),
            })
            .unwrap();
        assert_eq!(next.education.len(), 2);
        assert_eq!(next.education[1].institution, "ETH");
        assert!(next.education[1].dates.is_empty());
    }

    #[test]
    fn test_replace_with_wrong_shape_fails() {
        let doc = ResumeDocument::default();
        let err = doc
            .apply(&DocumentEdit::Replace {
                collection: Collection::Skills,
                entries: json!({"value": "Rust"}),
            })
            .unwrap_err();
        assert!(matches!(err, EditError::InvalidRows { collection: "skills", .. }));
    }

    #[test]
    fn test_edit_deserializes_from_tagged_json() {
        let edit: DocumentEdit =
            serde_json::from_value(json!({"op": "set", "path": "contact.name", "value": "Jane"}))
                .unwrap();
        assert!(matches!(edit, DocumentEdit::Set { .. }));
        let edit: DocumentEdit =
            serde_json::from_value(json!({"op": "remove", "collection": "achievements", "index": 0}))
                .unwrap();
        assert!(matches!(
            edit,
            DocumentEdit::Remove {
                collection: Collection::Achievements,
                index: 0
            }
        ));
    }

    #[test]
    fn test_get_reads_field() {
        let doc = ResumeDocument::default()
            .apply(&set("publications[0].title", "On Types"))
            .unwrap();
        assert_eq!(doc.get(&"publications[0].title".parse().unwrap()).unwrap(), "On Types");
        assert_eq!(doc.get(&FieldPath::References).unwrap(), "Available upon request.");
    }
}
