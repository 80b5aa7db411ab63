use std::fs;
use std::path::{Path, PathBuf};

use flatschema_core::ir::IdlSchema;
use flatschema_core::{CodeGenerator, GeneratedFile};
use log::debug;
use thiserror::Error;

use crate::emitters;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for the JSON Schema generator.
#[derive(Debug, Clone)]
pub struct JsonSchemaConfig {
    /// Base name of the primary input file, without directory or `.fbs` extension.
    pub file_name: String,
}

/// JSON Schema (draft-04) generator.
pub struct JsonSchemaGenerator;

impl CodeGenerator for JsonSchemaGenerator {
    type Config = JsonSchemaConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        schema: &IdlSchema,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        Ok(vec![GeneratedFile {
            path: generated_file_name(&config.file_name),
            content: emitters::document::emit_document(schema, &config.file_name)?,
        }])
    }
}

/// `<file_name>.schema.json`
pub fn generated_file_name(file_name: &str) -> String {
    format!("{file_name}.schema.json")
}

/// Generate the schema document and write it to `<out_dir>/<file_name>.schema.json`.
///
/// The whole document is rendered before anything touches the filesystem.
/// Returns the path that was written.
pub fn generate_json_schema(
    schema: &IdlSchema,
    out_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, GeneratorError> {
    let content = emitters::document::emit_document(schema, file_name)?;
    let path = out_dir.join(generated_file_name(file_name));
    save_file(&path, &content)?;
    Ok(path)
}

/// Write `content` to `path` byte for byte, creating parent directories and
/// replacing any existing file.
pub fn save_file(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let io_err = |source: std::io::Error| GeneratorError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)?;
    debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}
