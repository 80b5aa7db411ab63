use std::fmt;

use indexmap::IndexMap;

use super::definitions::{EnumDef, StructDef};

/// A fully resolved, generator-ready schema: the read-only AST of one IDL input.
#[derive(Debug, Clone)]
pub struct IdlSchema {
    /// Enums and unions, in declaration order.
    pub enums: Vec<EnumDef>,
    /// Structs and tables, in declaration order.
    pub structs: Vec<StructDef>,
    pub root: StructId,
}

impl IdlSchema {
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0]
    }

    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    pub fn root_struct(&self) -> &StructDef {
        self.struct_def(self.root)
    }
}

/// Index into `IdlSchema::enums`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(pub usize);

/// Index into `IdlSchema::structs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub usize);

/// A definition name with its namespace and the flattened qualified form pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub name: String,
    pub namespace: Vec<String>,
    /// `_`-joined namespace components plus the local name, e.g. `a_b_Color`.
    pub qualified: String,
}

impl QualifiedName {
    /// Namespace components joined with `.`, e.g. `a.b`.
    pub fn dotted_namespace(&self) -> String {
        self.namespace.join(".")
    }

    /// Fully qualified IDL spelling, e.g. `a.b.Color`.
    pub fn dotted(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.dotted_namespace(), self.name)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified)
    }
}

/// Metadata shared by every named enum, union, struct, and table.
#[derive(Debug, Clone)]
pub struct Definition {
    pub name: QualifiedName,
    /// Source path of the `.fbs` file the definition was declared in.
    pub file: String,
    /// Attribute name to constant value, in the order chosen at resolution time.
    pub attributes: IndexMap<String, String>,
    pub doc_comment: Vec<String>,
}
