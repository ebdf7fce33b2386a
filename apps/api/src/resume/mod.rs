// Resume data model: the template-independent document, the field-path
// addressing scheme and the edit operations that produce new snapshots.

pub mod document;
pub mod edit;
pub mod path;
pub mod section;

pub use document::ResumeDocument;
pub use edit::{DocumentEdit, EditError};
pub use path::FieldPath;
pub use section::{Collection, Section};
