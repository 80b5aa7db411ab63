pub mod definitions;
pub mod types;

pub use definitions::*;
pub use types::{Definition, EnumId, IdlSchema, QualifiedName, StructId};
