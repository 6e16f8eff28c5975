//! File parsers for source code and registry files.
//!
//! This module provides parsers for different file types:
//! - `json`: translation registry files (JSON array of records)
//! - `source`: JS/TS source files (uses swc for AST generation)

pub mod json;
pub mod source;
