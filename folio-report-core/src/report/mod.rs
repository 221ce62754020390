//! Report rendering.
//!
//! Two independent renderers consume the same artifact set and executive
//! summary: `html` produces the self-contained human-readable document,
//! `export` the machine-readable JSON record. Their section/group gating
//! must agree for every artifact subset, which both achieve by reading
//! the presence predicates on `ArtifactSet` and the summary's `Option`
//! fields instead of re-deriving presence locally.

pub mod export;
pub mod html;

pub use export::{build_export, export_json, ExportSummary};
pub use html::render_document;
