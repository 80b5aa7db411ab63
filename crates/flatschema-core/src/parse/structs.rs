use serde::{Deserialize, Serialize};

use super::document::DeclCommon;

/// A `struct` or `table` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDecl {
    #[serde(flatten)]
    pub common: DeclCommon,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// A field declaration; `type` uses IDL spelling (`int`, `[Monster]`, `a.b.Color`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub key: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
}
