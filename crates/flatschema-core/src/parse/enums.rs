use serde::{Deserialize, Serialize};

use super::document::DeclCommon;

/// An `enum` or `union` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    #[serde(flatten)]
    pub common: DeclCommon,
    /// Underlying integer type; defaults to `int` for enums and `ubyte` for unions.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValueDecl>,
}

/// An enum member, either a bare name or a full entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValueDecl {
    Name(String),
    Full {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
        /// Union member payload type; defaults to the member name.
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        member_type: Option<String>,
    },
}

impl EnumValueDecl {
    pub fn name(&self) -> &str {
        match self {
            EnumValueDecl::Name(name) | EnumValueDecl::Full { name, .. } => name,
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            EnumValueDecl::Name(_) => None,
            EnumValueDecl::Full { value, .. } => *value,
        }
    }

    pub fn member_type(&self) -> &str {
        match self {
            EnumValueDecl::Name(name) => name,
            EnumValueDecl::Full {
                name, member_type, ..
            } => member_type.as_deref().unwrap_or(name),
        }
    }
}
