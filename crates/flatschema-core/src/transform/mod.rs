pub mod doc_to_ir;
pub mod name_qualifier;
pub mod symbols;

pub use doc_to_ir::{TransformOptions, transform, transform_with_options};
