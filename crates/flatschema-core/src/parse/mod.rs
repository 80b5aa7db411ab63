pub mod document;
pub mod enums;
pub mod structs;
pub mod type_ref;

use crate::error::ParseError;
use document::SchemaDocument;

/// Highest schema description version this crate understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Parse a schema description document from YAML.
pub fn from_yaml(input: &str) -> Result<SchemaDocument, ParseError> {
    let doc: SchemaDocument = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a schema description document from JSON.
pub fn from_json(input: &str) -> Result<SchemaDocument, ParseError> {
    let doc: SchemaDocument = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &SchemaDocument) -> Result<(), ParseError> {
    match doc.version {
        Some(v) if v != SUPPORTED_VERSION => Err(ParseError::UnsupportedVersion(v)),
        _ => Ok(()),
    }
}
