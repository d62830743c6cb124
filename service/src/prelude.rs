//! Commonly used types

pub use crate::compiler::{PathRule, PathSchemaCompiler, compile_table};
pub use crate::loader::{TableReader, load_table};
pub use crate::rule_engine::{RuleCheckReport, RuleChecker};
pub use crate::schema::{LinkMLSchemaBuilder, SchemaModelBuilder, dump_schema};
pub use crate::table::{Column, PathTable};
pub use linkml_core::prelude::*;
