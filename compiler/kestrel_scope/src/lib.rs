//! Kestrel Scope - scope tree and symbol resolution for the Kestrel
//! configuration compiler.
//!
//! Every class, defined-type instance and node body is evaluated in its own
//! [`Scope`]. This crate resolves variables through the scope tree,
//! aggregates resource defaults and tags along the parent chain, and
//! interpolates variable references and escapes in string literals.
//!
//! # Architecture
//!
//! - [`Catalog`]: external owner of all scopes, resources and the
//!   class-scope registry; scopes refer to each other by [`ScopeId`]
//! - [`TypeRegistry`]: class and define declarations for namespace-relative
//!   name resolution
//! - [`Scope`]: write-once variables, namespaces, defaults, tags, flags
//! - [`registration`]: calls that mutate the catalog on a scope's behalf
//! - [`InMemoryCatalog`]: reference catalog for embedding and tests
//!
//! Evaluation is single-threaded. Independent compilations must use
//! independent catalogs.

mod catalog;
mod defaults;
mod error;
mod interpolate;
mod memory;
mod options;
pub mod registration;
mod resource;
mod scope;
mod symbols;
mod tags;
mod transport;
mod value;

pub use catalog::{Catalog, ClassDecl, ClassKind, DefineDecl, TypeDecl, TypeRegistry};
pub use defaults::{DefaultMap, DefaultSpec, DefaultTable};
pub use error::{ScopeError, ScopeResult};
pub use memory::{InMemoryCatalog, TypeTable};
pub use options::{OptionValue, ScopeOptions};
pub use registration::{child_scope, register_class, register_override, register_resource};
pub use resource::{Resource, ResourceRef};
pub use scope::{Scope, ScopeFlags, ScopeId, ScopeKind, NAMESPACE_SEPARATOR};
pub use symbols::SymbolTable;
pub use tags::is_valid_tag;
pub use transport::TransportNode;
pub use value::{Lookup, LookupMode, Value};

// Re-exported so embedders need only one import for locations and sinks.
pub use kestrel_diagnostic::{BufferSink, DiagnosticSink, SourceLocation, TracingSink};
