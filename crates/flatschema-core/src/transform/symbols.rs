use std::collections::{HashMap, HashSet};

use crate::error::ResolveError;
use crate::ir::{EnumId, Scalar, StructId, Type};
use crate::parse::document::{Declaration, SchemaDocument};
use crate::parse::type_ref::TypeRef;

use super::name_qualifier::{qualify, split_namespace, union_companion};

/// What a fully qualified name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Enum(EnumId),
    Struct(StructId),
}

#[derive(Debug, Clone, Copy)]
struct EnumInfo {
    is_union: bool,
    underlying: Scalar,
}

/// All declared names, registered before any type is resolved so that
/// declarations may reference each other in any order.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    enums: Vec<EnumInfo>,
    fixed: Vec<bool>,
}

impl SymbolTable {
    /// Register every declaration of `doc`. Enum and struct ids follow declaration order.
    pub fn build(doc: &SchemaDocument) -> Result<Self, ResolveError> {
        let mut table = SymbolTable::default();
        // Flattened definition keys, including union companions
        let mut keys = HashSet::new();

        for decl in &doc.definitions {
            let common = decl.common();
            let namespace = declaration_namespace(doc, decl);
            let full_name = dotted(&namespace, &common.name);

            if is_type_keyword(&common.name) {
                return Err(ResolveError::ReservedName(full_name));
            }

            let symbol = match decl {
                Declaration::Enum(e) | Declaration::Union(e) => {
                    let is_union = matches!(decl, Declaration::Union(_));
                    let default = if is_union { Scalar::UChar } else { Scalar::Int };
                    let underlying = match e.underlying.as_deref() {
                        None => default,
                        Some(name) => Scalar::from_idl(name)
                            .filter(|s| s.is_integer())
                            .ok_or_else(|| ResolveError::InvalidUnderlyingType(full_name.clone()))?,
                    };
                    table.enums.push(EnumInfo {
                        is_union,
                        underlying,
                    });
                    Symbol::Enum(EnumId(table.enums.len() - 1))
                }
                Declaration::Struct(_) | Declaration::Table(_) => {
                    table.fixed.push(matches!(decl, Declaration::Struct(_)));
                    Symbol::Struct(StructId(table.fixed.len() - 1))
                }
            };

            if table.symbols.insert(full_name.clone(), symbol).is_some() {
                return Err(ResolveError::DuplicateDefinition(full_name));
            }

            let key = qualify(&namespace, &common.name);
            let companion = matches!(decl, Declaration::Union(_)).then(|| union_companion(&key));
            for key in std::iter::once(key).chain(companion) {
                if !keys.insert(key.clone()) {
                    return Err(ResolveError::KeyCollision {
                        name: full_name,
                        key,
                    });
                }
            }
        }

        Ok(table)
    }

    /// Look a name up from inside `namespace`, searching the innermost scope first.
    pub fn lookup(&self, namespace: &[String], name: &str) -> Option<Symbol> {
        (0..=namespace.len())
            .rev()
            .find_map(|depth| self.symbols.get(&dotted(&namespace[..depth], name)))
            .copied()
    }

    pub fn is_fixed(&self, id: StructId) -> bool {
        self.fixed.get(id.0).copied().unwrap_or(false)
    }

    pub fn is_union(&self, id: EnumId) -> bool {
        self.enums.get(id.0).is_some_and(|e| e.is_union)
    }

    pub fn underlying(&self, id: EnumId) -> Scalar {
        self.enums
            .get(id.0)
            .map(|e| e.underlying)
            .unwrap_or(Scalar::Int)
    }

    /// Resolve a field type written in IDL spelling.
    pub fn resolve_type(
        &self,
        namespace: &[String],
        type_ref: &TypeRef,
        owner: &str,
        field: &str,
    ) -> Result<Type, ResolveError> {
        match type_ref {
            TypeRef::Named(name) => self.resolve_named(namespace, name, owner),
            TypeRef::Vector(inner) => match inner.as_ref() {
                TypeRef::Vector(_) => Err(ResolveError::NestedVector {
                    owner: owner.to_string(),
                    field: field.to_string(),
                }),
                TypeRef::Named(name) => Ok(Type::Vector(Box::new(
                    self.resolve_named(namespace, name, owner)?,
                ))),
            },
        }
    }

    /// Resolve a single type name: primitives first, then declared definitions.
    pub fn resolve_named(
        &self,
        namespace: &[String],
        name: &str,
        context: &str,
    ) -> Result<Type, ResolveError> {
        match name {
            "bool" => return Ok(Type::Bool),
            "string" => return Ok(Type::String),
            _ => {}
        }
        if let Some(scalar) = Scalar::from_idl(name) {
            return Ok(Type::Scalar(scalar));
        }

        match self.lookup(namespace, name) {
            Some(Symbol::Struct(id)) => Ok(Type::Struct(id)),
            Some(Symbol::Enum(id)) if self.is_union(id) => Ok(Type::Union(id)),
            Some(Symbol::Enum(id)) => Ok(Type::Enum {
                underlying: self.underlying(id),
                def: id,
            }),
            None => Err(ResolveError::UnknownType {
                name: name.to_string(),
                context: context.to_string(),
            }),
        }
    }
}

/// Namespace components of a declaration: its own override, else the document default.
pub fn declaration_namespace(doc: &SchemaDocument, decl: &Declaration) -> Vec<String> {
    decl.common()
        .namespace
        .as_deref()
        .or(doc.namespace.as_deref())
        .map(split_namespace)
        .unwrap_or_default()
}

/// Names the IDL reserves for built-in types.
fn is_type_keyword(name: &str) -> bool {
    matches!(name, "bool" | "string") || Scalar::from_idl(name).is_some()
}

fn dotted(namespace: &[String], name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace.join("."), name)
    }
}
