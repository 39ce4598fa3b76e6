//! Collaborator contracts.
//!
//! The scope engine does not own scopes, resources, or declarations. It
//! reaches them through two traits:
//! - [`Catalog`]: owns every scope, the parent links, the class-scope
//!   registry, resources and overrides
//! - [`TypeRegistry`]: the parsed class and define declarations
//!
//! [`InMemoryCatalog`](crate::InMemoryCatalog) implements both for
//! embedding and tests.

use crate::{Resource, ResourceRef, Scope, ScopeId, ScopeOptions, ScopeResult};

/// Whether a class declaration is an ordinary class or a node body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Node,
}

/// A parsed class (or node) declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    /// Fully qualified name, e.g. `apache::params`.
    pub name: String,
    pub kind: ClassKind,
}

impl ClassDecl {
    pub fn class(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            kind: ClassKind::Class,
        }
    }

    pub fn node(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            kind: ClassKind::Node,
        }
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        self.kind == ClassKind::Node
    }
}

/// A parsed defined-type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefineDecl {
    /// Fully qualified name, e.g. `apache::vhost`.
    pub name: String,
}

impl DefineDecl {
    pub fn new(name: impl Into<String>) -> Self {
        DefineDecl { name: name.into() }
    }
}

/// Result of resolving a type name: defines take precedence over classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeDecl<'a> {
    Define(&'a DefineDecl),
    Class(&'a ClassDecl),
}

impl TypeDecl<'_> {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Define(decl) => &decl.name,
            TypeDecl::Class(decl) => &decl.name,
        }
    }
}

/// Parsed class and define declarations, looked up relative to a namespace.
pub trait TypeRegistry {
    /// Find class `name` relative to `namespace` (`""` is the global namespace).
    fn find_class(&self, namespace: &str, name: &str) -> Option<&ClassDecl>;

    /// Find defined type `name` relative to `namespace`.
    fn find_defined_type(&self, namespace: &str, name: &str) -> Option<&DefineDecl>;
}

/// Owner of the scope tree and the global resource table.
///
/// A scope never owns its parent. It asks the catalog once and caches the
/// answer, so [`Catalog::parent`] must be stable for the scope's lifetime.
pub trait Catalog {
    /// Borrow a scope by id.
    fn scope(&self, id: ScopeId) -> Option<&Scope>;

    /// Mutably borrow a scope by id.
    fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope>;

    /// Parent of `id`, or `None` for the root.
    fn parent(&self, id: ScopeId) -> Option<ScopeId>;

    /// Scope produced by evaluating the class with this qualified name.
    fn class_scope(&self, qualified_name: &str) -> Option<ScopeId>;

    /// Record that `scope` is the evaluation scope of `qualified_name`.
    fn class_set(&mut self, qualified_name: &str, scope: ScopeId);

    /// Store a resource declared in `scope`.
    fn store_resource(&mut self, scope: ScopeId, resource: Resource) -> ResourceRef;

    /// Store an override for a resource that may not be declared yet.
    fn store_override(&mut self, resource: Resource);

    /// Create and link a new scope.
    fn new_scope(&mut self, parent: Option<ScopeId>, options: ScopeOptions) -> ScopeResult<ScopeId>;

    /// Find a declared resource.
    fn find_resource(&self, reference: &ResourceRef) -> Option<&Resource>;

    /// Class and define declarations.
    fn registry(&self) -> &dyn TypeRegistry;
}
