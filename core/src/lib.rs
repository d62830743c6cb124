//! # `LinkML` Core
//!
//! Core types for compiling GOLD classification path tables into `LinkML`
//! schemas: the schema object model, the error type and the compiler
//! configuration.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs

/// Core error types for `LinkML` operations
pub mod error;

/// Type definitions for `LinkML` schemas
pub mod types;

/// Configuration for the path schema compiler
pub mod config;

// Re-export commonly used types
pub use config::{PathSchemaConfig, RuleOrder, SchemaFormat};
pub use error::{LinkMLError, Result};
pub use types::{ClassDefinition, EnumDefinition, SchemaDefinition, SlotDefinition};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{LinkMLError, Result};
    pub use crate::types::*;
}
