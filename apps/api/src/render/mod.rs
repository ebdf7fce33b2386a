// Section rendering: suppression predicates plus the pure renderer that turns
// a template and a document snapshot into preview/export instructions.

pub mod renderer;
pub mod suppression;

pub use renderer::{render, RenderedResume};
