use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use flatschema_core::CodeGenerator;
use flatschema_core::config::{self, CONFIG_FILE_NAME, FlatschemaConfig};
use flatschema_core::ir::{FieldDef, IdlSchema, Type};
use flatschema_core::parse::{self, document::SchemaDocument};
use flatschema_core::transform::{self, TransformOptions};
use flatschema_json_schema::{JsonSchemaConfig, JsonSchemaGenerator, save_file};

#[derive(Parser)]
#[command(
    name = "flatschema",
    about = "FlatBuffers schema to JSON Schema (draft-04) generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate `<file_name>.schema.json` from a schema description
    Generate {
        /// Path to the schema description (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base name of the primary `.fbs` file; defaults to the input file stem
        #[arg(long)]
        file_name: Option<String>,
    },

    /// Validate a schema description
    Validate {
        /// Path to the schema description
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the resolved definitions of a schema description
    Inspect {
        /// Path to the schema description
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new flatschema configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            file_name,
        } => cmd_generate(input, output, file_name),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "flatschema", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<FlatschemaConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn read_document(path: &Path) -> Result<SchemaDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed)
}

fn load_schema(path: &Path, cfg: &FlatschemaConfig) -> Result<IdlSchema> {
    let parsed = read_document(path)?;

    let options = TransformOptions {
        attribute_order: cfg.attribute_order,
    };

    let schema = transform::transform_with_options(&parsed, &options)
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    debug!(
        "resolved {} enums and {} structs from {}",
        schema.enums.len(),
        schema.structs.len(),
        path.display()
    );
    Ok(schema)
}

/// Base name used for both the output file and the exclusive-definition test.
fn default_file_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a file name from {}", input.display()))
}

fn cmd_generate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    file_name: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let file_name = match file_name.or_else(|| cfg.file_name.clone()) {
        Some(name) => name,
        None => default_file_name(&input)?,
    };

    let schema = load_schema(&input, &cfg)?;

    eprintln!("Generating {} → {}", input.display(), output_dir.display());
    let files = JsonSchemaGenerator.generate(&schema, &JsonSchemaConfig { file_name })?;

    for file in &files {
        let path = output_dir.join(&file.path);
        save_file(&path, &file.content)?;
        eprintln!("  wrote {}", path.display());
    }

    eprintln!(
        "Generated {} file(s) in {}",
        files.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let parsed = read_document(&input)?;

    eprintln!("Valid schema description: {}", input.display());
    if let Some(ref namespace) = parsed.namespace {
        eprintln!("  Namespace: {namespace}");
    }
    eprintln!("  Declarations: {}", parsed.definitions.len());

    // Also validate that every reference resolves
    let schema = transform::transform(&parsed)
        .with_context(|| format!("failed to resolve {}", input.display()))?;
    let unions = schema.enums.iter().filter(|e| e.is_union).count();
    let fixed = schema.structs.iter().filter(|s| s.fixed).count();
    eprintln!("  Enums: {}", schema.enums.len() - unions);
    eprintln!("  Unions: {unions}");
    eprintln!("  Structs: {fixed}");
    eprintln!("  Tables: {}", schema.structs.len() - fixed);
    eprintln!("  Root: {}", schema.root_struct().def.name.dotted());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let schema = load_schema(&input, &cfg)?;

    let summary = build_inspect_summary(&schema);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(schema: &IdlSchema) -> serde_json::Value {
    let enums: Vec<serde_json::Value> = schema
        .enums
        .iter()
        .map(|e| {
            serde_json::json!({
                "name": e.def.name.qualified,
                "kind": if e.is_union { "union" } else { "enum" },
                "file": e.def.file,
                "underlying": e.underlying.name(),
                "values": e.values.iter().map(|v| &v.name).collect::<Vec<_>>(),
            })
        })
        .collect();

    let structs: Vec<serde_json::Value> = schema
        .structs
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.def.name.qualified,
                "kind": if s.fixed { "struct" } else { "table" },
                "file": s.def.file,
                "fields": s.fields.iter().map(|f| field_summary(schema, f)).collect::<Vec<_>>(),
                "key": s.key_field().map(|f| &f.name),
            })
        })
        .collect();

    serde_json::json!({
        "root": schema.root_struct().def.name.qualified,
        "enums": enums,
        "structs": structs,
    })
}

fn field_summary(schema: &IdlSchema, field: &FieldDef) -> serde_json::Value {
    let mut summary = serde_json::json!({
        "name": field.name,
        "type": type_label(schema, &field.ty),
    });
    if field.required {
        summary["required"] = true.into();
    }
    if !field.doc_comment.is_empty() {
        summary["doc"] = field.doc_comment.concat().into();
    }
    summary
}

/// IDL-style spelling of a resolved type, e.g. `[MyGame_Weapon]` or `a_b_Color: char`.
fn type_label(schema: &IdlSchema, ty: &Type) -> String {
    match ty {
        Type::Bool => "bool".to_string(),
        Type::String => "string".to_string(),
        Type::Scalar(scalar) => scalar.name().to_string(),
        Type::Enum { underlying, def } => format!(
            "{}: {}",
            schema.enum_def(*def).def.name.qualified,
            underlying.name()
        ),
        Type::Vector(element) => format!("[{}]", type_label(schema, element)),
        Type::Struct(id) => schema.struct_def(*id).def.name.qualified.clone(),
        Type::Union(id) => format!("union {}", schema.enum_def(*id).def.name.qualified),
        Type::UnionType(id) => format!("{}_type", schema.enum_def(*id).def.name.qualified),
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
