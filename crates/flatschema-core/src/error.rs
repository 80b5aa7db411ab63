use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema description version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown type '{name}' referenced from {context}")]
    UnknownType { name: String, context: String },

    #[error("definition already exists: {0}")]
    DuplicateDefinition(String),

    #[error("field '{field}' declared twice in {owner}")]
    DuplicateField { owner: String, field: String },

    #[error("only one field may be set as 'key' in {0}")]
    MultipleKeys(String),

    #[error("key field '{field}' in {owner} must be a scalar or string")]
    InvalidKey { owner: String, field: String },

    #[error("nested vector type in {owner}.{field}")]
    NestedVector { owner: String, field: String },

    #[error("struct {owner} may only contain scalars, enums and structs (field '{field}')")]
    InvalidStructField { owner: String, field: String },

    #[error("'{member}' in union {union} must be a table, struct or string")]
    InvalidUnionMember { union: String, member: String },

    #[error("'{0}' is a type keyword and cannot name a definition")]
    ReservedName(String),

    #[error("definition {name} collides with another definition on key '{key}'")]
    KeyCollision { name: String, key: String },

    #[error("value '{value}' declared twice in {owner}")]
    DuplicateEnumValue { owner: String, value: String },

    #[error("value {value} = {number} does not fit the underlying type {underlying} of {owner}")]
    EnumValueOutOfRange {
        owner: String,
        value: String,
        number: i128,
        underlying: String,
    },

    #[error("enum {0} must have an integer underlying type")]
    InvalidUnderlyingType(String),

    #[error("enum {0} has no values")]
    EmptyEnum(String),

    #[error("no root_type declared")]
    MissingRoot,

    #[error("root type {0} must be a table")]
    RootNotTable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
