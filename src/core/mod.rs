//! The literal rewrite engine.
//!
//! ## Module Structure
//!
//! - `template`: format classification and `%`-marker to placeholder conversion
//! - `registry`: translation registry model and the working registry used during a rewrite
//! - `locate`: literal site locator (AST traversal)
//! - `rewrite`: wrap decisions and tree transformation
//! - `usage`: translation call collection for `checkup`
//! - `extract`: registry seeding from wrap-able literals
//! - `fixup`: interactive registry repair state machine
//! - `context`: per-run configuration and file discovery
//! - `file_scanner`: source file selection
//! - `parsers`: source and registry file parsers
//! - `error`: fatal errors and recoverable warnings of a rewrite
//! - `data`: shared location types
//! - `utils`: translation callee matching and string literal helpers

pub mod context;
pub mod data;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod fixup;
pub mod locate;
pub mod parsers;
pub mod registry;
pub mod rewrite;
pub mod template;
pub mod usage;
pub mod utils;

pub use data::{SourceContext, SourceLocation};
pub use error::{RewriteError, RewriteWarning};
pub use registry::{Registry, RegistryEntry, RegistryMode, RenameOutcome, WorkingRegistry};
pub use template::FormatStyle;
