//! # GOLD `LinkML`
//!
//! Compiles a GOLD ecosystem classification table into a `LinkML` schema.
//!
//! Each row of the table is one valid classification path, for example
//! `Environmental > Aquatic > Marine > Oceanic > Abyssal plane`. The compiler
//! produces:
//!
//! - one slot per path position, ranging over
//! - one enum per path position holding the values seen in that column, and
//! - one `Path` class whose rules allow exactly the observed combinations:
//!   for every observed prefix, the next position must be one of the values
//!   that followed that prefix somewhere in the table.
//!
//! ## Quick Start
//!
//! ```rust
//! use linkml_service::compiler::compile_table;
//! use linkml_service::table::PathTable;
//! use linkml_core::PathSchemaConfig;
//!
//! # fn main() -> linkml_core::Result<()> {
//! let table = PathTable::from_rows(
//!     ["ECOSYSTEM", "ECOSYSTEM CATEGORY"],
//!     vec![
//!         vec!["Environmental", "Aquatic"],
//!         vec!["Environmental", "Terrestrial"],
//!         vec!["Host-associated", "Plants"],
//!     ],
//! )?;
//! let schema = compile_table(&table, &PathSchemaConfig::default())?;
//!
//! assert_eq!(schema.slots.len(), 2);
//! assert_eq!(schema.classes["Path"].rules.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Command line
//!
//! ```text
//! gold-linkml GOLD-Ecosystem-Classification.xlsx > gold.yaml
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)] // subjective determination
#![allow(clippy::return_self_not_must_use)] // builder patterns
#![allow(clippy::doc_markdown)] // LinkML, GOLD are proper nouns
#![allow(clippy::collapsible_if)] // sometimes separate ifs are more readable
#![allow(clippy::float_cmp)] // whole-number detection for spreadsheet cells

/// In-memory path table
pub mod table;

/// Slot and enum name derivation
pub mod naming;

/// Path-to-constraint compiler
pub mod compiler;

/// Schema model builder and serializer
pub mod schema;

/// Spreadsheet and delimited-text table readers
pub mod loader;

/// Rule checking against compiled schemas
pub mod rule_engine;

/// Command-line interface
pub mod cli;

/// Prelude module for convenient imports
pub mod prelude;

pub use compiler::{PathSchemaCompiler, compile_table};
pub use linkml_core::error::LinkMLError;
pub use linkml_core::prelude::*;
pub use table::PathTable;

use std::path::Path;

/// Load the table at `path` and compile it with `config`
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or compiled.
pub fn compile_file(path: &Path, config: &PathSchemaConfig) -> Result<SchemaDefinition> {
    let table = loader::load_table(path, &config.table)?;
    PathSchemaCompiler::new(config.clone()).compile_source(&table, &loader::source_name(path))
}
