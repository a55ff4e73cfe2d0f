//! Echocheck - structural redundancy linter for PHP.
//!
//! Echocheck analyzes parsed source trees and flags code that is
//! structurally redundant or mechanically improvable:
//!
//! - `duplicate_override`: a subclass method whose body is identical to the
//!   method it overrides, decided by structural tree equivalence with a
//!   textual fallback, then confirmed by fully-qualified symbol
//!   reconciliation so that namespace/import aliasing never produces a
//!   false positive.
//! - `inefficient_unique_call`: `count()`/`array_values()` wrapped around
//!   `array_unique()`, where `array_count_values()` does the job in one
//!   pass.
//!
//! # Architecture
//!
//! - `analysis`: tree model, PHP frontend, scopes, declaration index,
//!   statement equivalence
//! - `rules`: detection rules consuming the model through injected
//!   lookup/resolution capabilities
//! - `config`: YAML configuration (immutable per run)
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line entry points

pub mod analysis;
pub mod cli;
pub mod config;
pub mod report;
pub mod rules;

pub use analysis::{
    compare_statements, statement_count, structurally_equal, ClassDecl, DeclarationIndex,
    DeclarationLookup, EquivalenceVerdict, FileModel, MethodDecl, Node, PhpAnalyzer, ProjectModel,
    RefRole, Span, SymbolResolver,
};
pub use config::LintConfig;
pub use rules::{
    check_override_redundancy, check_unique_filter_calls, Diagnostic, LintResult, RuleId, Runner,
    Severity,
};
