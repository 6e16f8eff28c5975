//! Utility functions and helpers for the rewrite engine.
//!
//! ## Module Structure
//!
//! - `callee`: translation function paths and callee matching
//! - `literal`: string literal inspection and quoting

pub mod callee;
pub mod literal;

pub use callee::*;
pub use literal::*;
