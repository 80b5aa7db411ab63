use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::enums::EnumDecl;
use super::structs::StructDecl;

/// Serialized form of a parsed IDL schema.
///
/// Declarations keep their source order; enums and unions end up in one
/// sequence, structs and tables in another, exactly like the IDL parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDocument {
    pub version: Option<u32>,
    /// Default source path for every declaration.
    pub file: Option<String>,
    /// Default dotted namespace for every declaration.
    pub namespace: Option<String>,
    pub root_type: Option<String>,
    pub definitions: Vec<Declaration>,
}

/// A single top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Enum(EnumDecl),
    Union(EnumDecl),
    Struct(StructDecl),
    Table(StructDecl),
}

impl Declaration {
    pub fn common(&self) -> &DeclCommon {
        match self {
            Declaration::Enum(e) | Declaration::Union(e) => &e.common,
            Declaration::Struct(s) | Declaration::Table(s) => &s.common,
        }
    }
}

/// Metadata every declaration carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeclCommon {
    pub name: String,
    /// Overrides the document namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Overrides the document source path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, serde_json::Value>,
}
