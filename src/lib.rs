//! intlwrap - wrap JavaScript/TypeScript string literals in translation calls
//!
//! intlwrap is a CLI tool and library that finds the string literals of a
//! source file, decides which of them should be translated, and rewrites
//! them into calls of a translation function while keeping a per-file
//! registry of the translatable strings in sync.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Literal location, rewrite engine and registry handling
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
