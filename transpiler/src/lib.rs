//! Interface schema transpiler
//!
//! Lowers a parsed interface schema into a flat stream of logic facts:
//! - Template registration (declared anywhere, instantiated anywhere)
//! - Hygienic expansion with per-instance and shared member qualification
//! - Definition and relation lowering to `set`/`structure`/`instance`/`apply_*` facts

mod error;
mod fact;
mod options;
mod registry;
mod rename;
mod scope;
mod transpiler;

pub use error::*;
pub use fact::{Fact, FactBase, Unimplemented};
pub use options::{TranspileOptions, DEFAULT_STRUCTURE_TAGS};
pub use registry::TemplateRegistry;
pub use rename::{qualify, Renames};
pub use scope::{ExpansionScope, ScopeStack};
pub use transpiler::{transpile, transpile_with, TranspileContext};

/// Parse and lower `source` with default options.
pub fn compile(source: &str) -> CompileResult<String> {
    compile_with(source, &TranspileOptions::default()).map(|facts| facts.render())
}

/// Parse and lower `source`.
pub fn compile_with(source: &str, options: &TranspileOptions) -> CompileResult<FactBase> {
    let program = isc_parser::parse(source)?;
    Ok(transpile_with(&program, options)?)
}
