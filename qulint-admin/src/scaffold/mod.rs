//! Schema-driven scaffold generation
//!
//! Turns a model's column schema into form, show and grid statements for
//! hand-written screen definitions.

pub mod field_kind;
pub mod generator;
pub mod helpers;
pub mod syntax;

pub use field_kind::{sniff_name, FieldKind, FormField};
pub use generator::{Artifact, GenerationResult, ScaffoldGenerator, LINE_ENDING};
pub use helpers::TemplateHelpers;
pub use syntax::{LineRenderer, ScaffoldSyntax};
