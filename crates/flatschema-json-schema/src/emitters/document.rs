use flatschema_core::ir::IdlSchema;
use minijinja::{AutoEscape, Environment, context};

use super::definitions::DefinitionEmitter;
use super::json_string;
use crate::type_mapper::definition_ref;

/// Value of the document's `$schema` keyword.
pub const SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

/// Emit the complete `<file_name>.schema.json` document for `schema`.
///
/// `file_name` is the base name of the primary input; definitions declared in
/// `<dir>/<file_name>.fbs` are flagged with `exclusiveDefinition: true`.
pub fn emit_document(schema: &IdlSchema, file_name: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.add_template(
        "schema.json.j2",
        include_str!("../../templates/schema.json.j2"),
    )?;
    let tmpl = env.get_template("schema.json.j2")?;

    let definitions: Vec<minijinja::Value> = DefinitionEmitter::new(schema, file_name)
        .emit_all()
        .into_iter()
        .map(|entry| {
            context! {
                key => json_string(&entry.key),
                members => entry.members,
            }
        })
        .collect();

    tmpl.render(context! {
        schema_uri => json_string(SCHEMA_DRAFT),
        definitions => definitions,
        root_ref => definition_ref(&schema.root_struct().def.name.qualified),
    })
}
