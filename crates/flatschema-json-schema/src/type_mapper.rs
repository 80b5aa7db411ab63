use flatschema_core::ir::{EnumId, IdlSchema, Scalar, StructId, Type};
use flatschema_core::transform::name_qualifier::union_companion;

use crate::emitters::json_string;
use crate::primitives::primitive_name;

/// JSON pointer prefix of every cross-reference.
pub const DEFINITIONS_POINTER: &str = "#/definitions/";

/// Map a field type to a JSON fragment that can be embedded in an object literal.
///
/// The fragment never carries a leading or trailing comma, and every `$ref`
/// it produces names a key emitted under `definitions`.
pub fn type_to_fragment(schema: &IdlSchema, ty: &Type) -> String {
    match ty {
        Type::Enum { def, .. } => enum_ref(schema, *def),
        Type::Vector(element) => format!(
            "\"type\" : \"array\", \"items\" : {{ {} }}",
            type_to_fragment(schema, element)
        ),
        Type::Struct(id) => struct_ref(schema, *id),
        Type::Union(id) => union_ref(schema, *id),
        Type::UnionType(id) => enum_ref(schema, *id),
        Type::Scalar(scalar) => match primitive_name(*scalar) {
            Some(name) => definition_ref(name),
            None => native_type(*scalar),
        },
        Type::Bool => type_keyword("boolean"),
        Type::String => type_keyword("string"),
    }
}

/// `"$ref" : "#/definitions/<key>"`
pub fn definition_ref(key: &str) -> String {
    format!(
        "\"$ref\" : {}",
        json_string(&format!("{DEFINITIONS_POINTER}{key}"))
    )
}

pub fn enum_ref(schema: &IdlSchema, id: EnumId) -> String {
    definition_ref(&schema.enum_def(id).def.name.qualified)
}

pub fn struct_ref(schema: &IdlSchema, id: StructId) -> String {
    definition_ref(&schema.struct_def(id).def.name.qualified)
}

pub fn union_ref(schema: &IdlSchema, id: EnumId) -> String {
    definition_ref(&union_key(&schema.enum_def(id).def.name.qualified))
}

/// Definition key of the companion entry of a union.
pub fn union_key(qualified: &str) -> String {
    union_companion(qualified)
}

fn type_keyword(name: &str) -> String {
    format!("\"type\" : {}", json_string(name))
}

fn native_type(scalar: Scalar) -> String {
    type_keyword(if scalar.is_integer() { "integer" } else { "number" })
}
