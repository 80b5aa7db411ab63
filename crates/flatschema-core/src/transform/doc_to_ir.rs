use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::config::AttributeOrder;
use crate::error::ResolveError;
use crate::ir::*;
use crate::parse::document::{DeclCommon, Declaration, SchemaDocument};
use crate::parse::enums::EnumDecl;
use crate::parse::structs::StructDecl;
use crate::parse::type_ref::TypeRef;

use super::name_qualifier::{qualified_name, split_namespace};
use super::symbols::{Symbol, SymbolTable, declaration_namespace};

/// Name of the implicit first member of every union.
pub const UNION_NONE: &str = "NONE";

/// Suffix of the discriminator field generated next to every union field.
pub const UNION_TYPE_SUFFIX: &str = "_type";

/// Options controlling how the transform phase records definitions.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    pub attribute_order: AttributeOrder,
}

/// Resolve a schema description document into the read-only AST.
pub fn transform(doc: &SchemaDocument) -> Result<IdlSchema, ResolveError> {
    transform_with_options(doc, &TransformOptions::default())
}

/// Resolve with explicit options.
pub fn transform_with_options(
    doc: &SchemaDocument,
    options: &TransformOptions,
) -> Result<IdlSchema, ResolveError> {
    // Phase 1: Register every declared name
    let symbols = SymbolTable::build(doc)?;

    // Phase 2: Resolve enums/unions and structs/tables in declaration order
    let mut enums = Vec::new();
    let mut structs = Vec::new();
    for decl in &doc.definitions {
        let namespace = declaration_namespace(doc, decl);
        let def = build_definition(doc, decl.common(), namespace.clone(), options);
        trace!("resolving {}", def.name.dotted());

        match decl {
            Declaration::Enum(e) | Declaration::Union(e) => {
                let id = EnumId(enums.len());
                enums.push(build_enum(e, def, id, &symbols)?)
            }
            Declaration::Struct(s) => {
                structs.push(build_struct(s, def, true, &namespace, &symbols)?)
            }
            Declaration::Table(s) => {
                structs.push(build_struct(s, def, false, &namespace, &symbols)?)
            }
        }
    }

    // Phase 3: Locate the root table
    let root = resolve_root(doc, &symbols)?;

    debug!(
        "resolved {} enums and {} structs, root {}",
        enums.len(),
        structs.len(),
        structs[root.0].def.name.dotted()
    );

    Ok(IdlSchema {
        enums,
        structs,
        root,
    })
}

fn build_definition(
    doc: &SchemaDocument,
    common: &DeclCommon,
    namespace: Vec<String>,
    options: &TransformOptions,
) -> Definition {
    let mut attributes: IndexMap<String, String> = common
        .attributes
        .iter()
        .map(|(name, value)| (name.clone(), attribute_constant(value)))
        .collect();
    if options.attribute_order == AttributeOrder::Sorted {
        attributes.sort_keys();
    }

    Definition {
        name: qualified_name(namespace, &common.name),
        file: common
            .file
            .clone()
            .or_else(|| doc.file.clone())
            .unwrap_or_default(),
        attributes,
        doc_comment: common.doc.clone(),
    }
}

/// Attribute values are kept as the constant text the IDL parser would store.
fn attribute_constant(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "0".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn build_enum(
    decl: &EnumDecl,
    def: Definition,
    id: EnumId,
    symbols: &SymbolTable,
) -> Result<EnumDef, ResolveError> {
    let is_union = symbols.is_union(id);
    let underlying = symbols.underlying(id);
    let owner = def.name.dotted();
    let mut values = Vec::with_capacity(decl.values.len() + 1);
    let mut seen = HashSet::new();
    // Wide enough that auto-incrementing past i64::MAX is reported, not wrapped
    let mut next_value = 0i128;

    if is_union && decl.values.first().map(|v| v.name()) != Some(UNION_NONE) {
        values.push(EnumVal {
            name: UNION_NONE.to_string(),
            value: 0,
            union_type: None,
        });
        seen.insert(UNION_NONE);
        next_value = 1;
    }

    for value_decl in &decl.values {
        if !seen.insert(value_decl.name()) {
            return Err(ResolveError::DuplicateEnumValue {
                owner,
                value: value_decl.name().to_string(),
            });
        }

        let number = value_decl.value().map_or(next_value, i128::from);
        let value = i64::try_from(number)
            .ok()
            .filter(|v| underlying.fits(*v))
            .ok_or_else(|| ResolveError::EnumValueOutOfRange {
                owner: owner.clone(),
                value: value_decl.name().to_string(),
                number,
                underlying: underlying.name().to_string(),
            })?;
        next_value = number + 1;

        let union_type = if is_union && value_decl.name() != UNION_NONE {
            let member =
                symbols.resolve_named(&def.name.namespace, value_decl.member_type(), &owner)?;
            if !matches!(member, Type::Struct(_) | Type::String) {
                return Err(ResolveError::InvalidUnionMember {
                    union: owner,
                    member: value_decl.member_type().to_string(),
                });
            }
            Some(member)
        } else {
            None
        };

        values.push(EnumVal {
            name: value_decl.name().to_string(),
            value,
            union_type,
        });
    }

    if values.is_empty() {
        return Err(ResolveError::EmptyEnum(owner));
    }

    Ok(EnumDef {
        underlying,
        def,
        values,
        is_union,
    })
}

fn build_struct(
    decl: &StructDecl,
    def: Definition,
    fixed: bool,
    namespace: &[String],
    symbols: &SymbolTable,
) -> Result<StructDef, ResolveError> {
    let owner = def.name.dotted();
    let mut fields: Vec<FieldDef> = Vec::with_capacity(decl.fields.len());
    let mut seen = HashSet::new();
    let mut key_field = None;

    for field in &decl.fields {
        let ty = symbols.resolve_type(
            namespace,
            &TypeRef::parse(&field.field_type),
            &owner,
            &field.name,
        )?;

        if fixed && !allowed_in_struct(&ty, symbols) {
            return Err(ResolveError::InvalidStructField {
                owner,
                field: field.name.clone(),
            });
        }

        // Unions carry a generated discriminator field declared just before them
        let discriminator = match &ty {
            Type::Union(id) => Some(Type::UnionType(*id)),
            Type::Vector(inner) => match inner.as_ref() {
                Type::Union(id) => Some(Type::Vector(Box::new(Type::UnionType(*id)))),
                _ => None,
            },
            _ => None,
        };
        if let Some(tag_type) = discriminator {
            let tag_name = format!("{}{}", field.name, UNION_TYPE_SUFFIX);
            insert_field_name(&mut seen, &owner, &tag_name)?;
            fields.push(FieldDef {
                name: tag_name,
                ty: tag_type,
                required: false,
                key: false,
                doc_comment: Vec::new(),
            });
        }

        insert_field_name(&mut seen, &owner, &field.name)?;

        if field.key {
            if key_field.is_some() {
                return Err(ResolveError::MultipleKeys(owner));
            }
            if !(ty.is_scalar() || ty == Type::String) {
                return Err(ResolveError::InvalidKey {
                    owner,
                    field: field.name.clone(),
                });
            }
            key_field = Some(fields.len());
        }

        fields.push(FieldDef {
            name: field.name.clone(),
            ty,
            required: field.required,
            key: field.key,
            doc_comment: field.doc.clone(),
        });
    }

    Ok(StructDef {
        def,
        fields,
        fixed,
        key_field,
    })
}

fn allowed_in_struct(ty: &Type, symbols: &SymbolTable) -> bool {
    match ty {
        Type::Bool | Type::Scalar(_) | Type::Enum { .. } => true,
        Type::Struct(id) => symbols.is_fixed(*id),
        _ => false,
    }
}

fn insert_field_name(
    seen: &mut HashSet<String>,
    owner: &str,
    name: &str,
) -> Result<(), ResolveError> {
    if !seen.insert(name.to_string()) {
        return Err(ResolveError::DuplicateField {
            owner: owner.to_string(),
            field: name.to_string(),
        });
    }
    Ok(())
}

fn resolve_root(doc: &SchemaDocument, symbols: &SymbolTable) -> Result<StructId, ResolveError> {
    let root_name = doc.root_type.as_deref().ok_or(ResolveError::MissingRoot)?;
    let namespace = doc
        .namespace
        .as_deref()
        .map(split_namespace)
        .unwrap_or_default();

    match symbols.lookup(&namespace, root_name) {
        Some(Symbol::Struct(id)) if symbols.is_fixed(id) => {
            Err(ResolveError::RootNotTable(root_name.to_string()))
        }
        Some(Symbol::Struct(id)) => Ok(id),
        _ => Err(ResolveError::UnknownType {
            name: root_name.to_string(),
            context: "root_type".to_string(),
        }),
    }
}
