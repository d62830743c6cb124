//! Schema model construction and serialization

pub mod builder;
pub mod serializer;

pub use builder::{LinkMLSchemaBuilder, SchemaModelBuilder};
pub use serializer::{dump_schema, load_schema_str};
