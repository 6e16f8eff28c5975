//! Data types shared by the engine and the reporting layer.
//!
//! - `source`: source code location types (SourceContext, SourceLocation)

pub mod source;

pub use source::{SourceContext, SourceLocation};
