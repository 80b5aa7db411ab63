pub mod emitters;
pub mod generator;
pub mod primitives;
pub mod type_mapper;

pub use generator::{
    GeneratorError, JsonSchemaConfig, JsonSchemaGenerator, generate_json_schema,
    generated_file_name, save_file,
};
