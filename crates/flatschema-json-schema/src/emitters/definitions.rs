use flatschema_core::ir::{Definition, EnumDef, IdlSchema, StructDef, Type};

use super::json_string;
use crate::primitives::{DECIMAL_INFOS, DecimalInfo, INTEGER_INFOS, IntegerInfo};
use crate::type_mapper::{struct_ref, type_to_fragment, union_key};

/// Indentation of members nested one level inside a definition body.
const NESTED_INDENT: &str = "        ";
/// Indentation of a definition body's closing bracket lines.
const BODY_INDENT: &str = "      ";

/// One entry under `definitions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub key: String,
    /// Complete `"name" : value` members, in emission order and without separators.
    pub members: Vec<String>,
}

/// Builds every `definitions` entry of one schema.
pub struct DefinitionEmitter<'a> {
    schema: &'a IdlSchema,
    file_name: &'a str,
}

impl<'a> DefinitionEmitter<'a> {
    /// `file_name` is the base name of the primary input, used for `exclusiveDefinition`.
    pub fn new(schema: &'a IdlSchema, file_name: &'a str) -> Self {
        Self { schema, file_name }
    }

    /// Integer primitives, decimal primitives, enums (each union followed by
    /// its companion), then structs and tables.
    pub fn emit_all(&self) -> Vec<DefinitionEntry> {
        let mut entries: Vec<DefinitionEntry> = INTEGER_INFOS.iter().map(integer_entry).collect();
        entries.extend(DECIMAL_INFOS.iter().map(decimal_entry));

        for enum_def in &self.schema.enums {
            entries.push(self.enum_entry(enum_def));
            if enum_def.is_union {
                entries.push(self.union_entry(enum_def));
            }
        }

        entries.extend(self.schema.structs.iter().map(|s| self.struct_entry(s)));
        entries
    }

    pub fn enum_entry(&self, enum_def: &EnumDef) -> DefinitionEntry {
        let names: Vec<String> = enum_def.values.iter().map(|v| json_string(&v.name)).collect();
        let values: Vec<String> = enum_def.values.iter().map(|v| v.value.to_string()).collect();

        let mut members = vec![member("type", &json_string("string"))];
        members.extend(self.basic_info(&enum_def.def));
        members.push(member("isEnum", &json_string("true")));
        members.push(member("enum", &inline_array(&names)));
        members.push(member("enum_values", &inline_array(&values)));

        DefinitionEntry {
            key: enum_def.def.name.qualified.clone(),
            members,
        }
    }

    /// Companion entry listing the struct payloads of a union.
    pub fn union_entry(&self, enum_def: &EnumDef) -> DefinitionEntry {
        let any_of: Vec<String> = enum_def
            .values
            .iter()
            .filter_map(|v| match &v.union_type {
                Some(Type::Struct(id)) => Some(format!("{{ {} }}", struct_ref(self.schema, *id))),
                _ => None,
            })
            .collect();

        let mut members = self.basic_info(&enum_def.def);
        members.push(member("isUnion", &json_string("true")));
        members.push(member("anyOf", &block('[', &any_of, ']')));

        DefinitionEntry {
            key: union_key(&enum_def.def.name.qualified),
            members,
        }
    }

    pub fn struct_entry(&self, struct_def: &StructDef) -> DefinitionEntry {
        let properties: Vec<String> = struct_def
            .fields
            .iter()
            .map(|f| {
                format!(
                    "{} : {{ {} }}",
                    json_string(&f.name),
                    type_to_fragment(self.schema, &f.ty)
                )
            })
            .collect();

        let mut members = vec![member("type", &json_string("object"))];
        members.extend(self.basic_info(&struct_def.def));
        members.push(member("properties", &block('{', &properties, '}')));
        if let Some(key) = struct_def.key_field() {
            members.push(member("key", &json_string(&key.name)));
        }
        if struct_def.fixed {
            members.push(member("struct", "true"));
        } else {
            members.push(member("table", "true"));
        }

        let required: Vec<String> = struct_def
            .required_fields()
            .map(|f| json_string(&f.name))
            .collect();
        if !required.is_empty() {
            members.push(member("required", &inline_array(&required)));
        }
        members.push(member("additionalProperties", "false"));

        DefinitionEntry {
            key: struct_def.def.name.qualified.clone(),
            members,
        }
    }

    /// Metadata members shared by enums, union companions, structs and tables.
    pub fn basic_info(&self, def: &Definition) -> Vec<String> {
        let mut members = vec![member(
            "exclusiveDefinition",
            if self.is_exclusive(&def.file) {
                "true"
            } else {
                "false"
            },
        )];

        if !def.attributes.is_empty() {
            let attributes: Vec<String> = def
                .attributes
                .iter()
                .map(|(name, constant)| {
                    format!("{} : {}", json_string(name), json_string(constant))
                })
                .collect();
            members.push(member("attributes", &block('{', &attributes, '}')));
        }

        members.push(member("namespace", &json_string(&def.name.dotted_namespace())));
        members.push(member("name", &json_string(&def.name.name)));

        let description = def.doc_comment.concat();
        if !description.is_empty() {
            members.push(member("description", &json_string(&description)));
        }

        members
    }

    /// True when `path` is the primary input file rather than an included one.
    pub fn is_exclusive(&self, path: &str) -> bool {
        path.contains(&format!("/{}.fbs", self.file_name))
    }
}

fn integer_entry(info: &IntegerInfo) -> DefinitionEntry {
    DefinitionEntry {
        key: info.name().to_string(),
        members: vec![
            member("type", &json_string("integer")),
            member("name", &json_string(info.name())),
            member("minimum", &info.min_value.to_string()),
            member("maximum", &info.max_value.to_string()),
        ],
    }
}

fn decimal_entry(info: &DecimalInfo) -> DefinitionEntry {
    DefinitionEntry {
        key: info.name().to_string(),
        members: vec![
            member("type", &json_string("number")),
            member("name", &json_string(info.name())),
            member("bits", &info.bits.to_string()),
        ],
    }
}

fn member(name: &str, value: &str) -> String {
    format!("{} : {}", json_string(name), value)
}

/// `[a, b, c]` on a single line.
fn inline_array(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

/// One item per line between `open` and `close`; `{}` / `[]` when empty.
fn block(open: char, items: &[String], close: char) -> String {
    if items.is_empty() {
        return format!("{open}{close}");
    }
    let body: Vec<String> = items
        .iter()
        .map(|item| format!("{NESTED_INDENT}{item}"))
        .collect();
    format!("{open}\n{}\n{BODY_INDENT}{close}", body.join(",\n"))
}
