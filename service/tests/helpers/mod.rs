//! Shared fixtures for integration tests
#![allow(dead_code)]

pub mod gold_table_generator;
