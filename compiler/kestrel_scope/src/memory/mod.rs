//! In-memory catalog and type registry.
//!
//! `InMemoryCatalog` keeps every scope in an arena indexed by [`ScopeId`]
//! and records parent links in a side table, so scopes hold ids rather
//! than references to each other.

use rustc_hash::FxHashMap;

use crate::{
    Catalog, ClassDecl, DefineDecl, Resource, ResourceRef, Scope, ScopeError, ScopeId,
    ScopeOptions, ScopeResult, TypeRegistry, NAMESPACE_SEPARATOR,
};

/// Qualified, lower-cased registry key for `name` relative to `namespace`.
///
/// An absolute name (`::foo`) ignores the namespace.
fn qualify(namespace: &str, name: &str) -> String {
    let full = match name.strip_prefix(NAMESPACE_SEPARATOR) {
        Some(absolute) => absolute.to_string(),
        None if namespace.is_empty() => name.to_string(),
        None => format!("{namespace}{NAMESPACE_SEPARATOR}{name}"),
    };
    full.to_lowercase()
}

/// Keys to try for `name` seen from `namespace`, innermost first.
///
/// `name` is tried inside `namespace`, then inside each enclosing
/// namespace, then globally: from `a::b`, `c` tries `a::b::c`, `a::c`, `c`.
fn candidates(namespace: &str, name: &str) -> Vec<String> {
    if name.starts_with(NAMESPACE_SEPARATOR) {
        return vec![qualify("", name)];
    }
    let mut keys = Vec::new();
    let mut current = namespace;
    loop {
        keys.push(qualify(current, name));
        if current.is_empty() {
            break;
        }
        current = current
            .rsplit_once(NAMESPACE_SEPARATOR)
            .map_or("", |(outer, _)| outer);
    }
    keys
}

/// Class and define declarations keyed by qualified name.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    classes: FxHashMap<String, ClassDecl>,
    defines: FxHashMap<String, DefineDecl>,
}

impl TypeTable {
    pub fn new() -> Self {
        TypeTable::default()
    }

    /// Add a class. A later declaration with the same name replaces it.
    pub fn add_class(&mut self, class: ClassDecl) {
        self.classes.insert(qualify("", &class.name), class);
    }

    /// Add a defined type.
    pub fn add_defined_type(&mut self, define: DefineDecl) {
        self.defines.insert(qualify("", &define.name), define);
    }

    #[must_use]
    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.add_class(class);
        self
    }

    #[must_use]
    pub fn with_defined_type(mut self, define: DefineDecl) -> Self {
        self.add_defined_type(define);
        self
    }
}

impl TypeRegistry for TypeTable {
    fn find_class(&self, namespace: &str, name: &str) -> Option<&ClassDecl> {
        candidates(namespace, name)
            .iter()
            .find_map(|key| self.classes.get(key))
    }

    fn find_defined_type(&self, namespace: &str, name: &str) -> Option<&DefineDecl> {
        candidates(namespace, name)
            .iter()
            .find_map(|key| self.defines.get(key))
    }
}

/// A catalog that keeps everything in memory.
#[derive(Debug)]
pub struct InMemoryCatalog {
    scopes: Vec<Scope>,
    parents: FxHashMap<ScopeId, ScopeId>,
    class_scopes: FxHashMap<String, ScopeId>,
    /// Every declaration in order, with its declaring scope.
    resources: Vec<(ScopeId, Resource)>,
    /// First declaration of each reference.
    resource_index: FxHashMap<ResourceRef, usize>,
    overrides: FxHashMap<ResourceRef, Vec<Resource>>,
    registry: TypeTable,
    top: ScopeId,
}

impl InMemoryCatalog {
    /// Create a catalog with a fresh top scope of type `""` (main).
    pub fn new(registry: TypeTable) -> Self {
        let top = ScopeId::new(0);
        let options = ScopeOptions {
            type_name: Some(String::new()),
            top: true,
            ..ScopeOptions::default()
        };
        InMemoryCatalog {
            scopes: vec![Scope::new(top, options, None)],
            parents: FxHashMap::default(),
            class_scopes: FxHashMap::default(),
            resources: Vec::new(),
            resource_index: FxHashMap::default(),
            overrides: FxHashMap::default(),
            registry,
            top,
        }
    }

    /// The root scope.
    pub fn top(&self) -> ScopeId {
        self.top
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Resources declared in `scope`, in declaration order.
    pub fn resources_in(&self, scope: ScopeId) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |(declared_in, _)| *declared_in == scope)
            .map(|(_, resource)| resource)
    }

    /// Every declared resource, in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter().map(|(_, resource)| resource)
    }

    /// Overrides recorded for `reference`.
    pub fn overrides_for(&self, reference: &ResourceRef) -> &[Resource] {
        self.overrides
            .get(reference)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn registry_mut(&mut self) -> &mut TypeTable {
        &mut self.registry
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        InMemoryCatalog::new(TypeTable::default())
    }
}

impl Catalog for InMemoryCatalog {
    fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.raw() as usize)
    }

    fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.raw() as usize)
    }

    fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.parents.get(&id).copied()
    }

    fn class_scope(&self, qualified_name: &str) -> Option<ScopeId> {
        self.class_scopes.get(&qualify("", qualified_name)).copied()
    }

    fn class_set(&mut self, qualified_name: &str, scope: ScopeId) {
        self.class_scopes.insert(qualify("", qualified_name), scope);
    }

    fn store_resource(&mut self, scope: ScopeId, resource: Resource) -> ResourceRef {
        let reference = resource.reference.clone();
        let index = self.resources.len();
        self.resources.push((scope, resource));
        self.resource_index.entry(reference.clone()).or_insert(index);
        reference
    }

    fn store_override(&mut self, resource: Resource) {
        self.overrides
            .entry(resource.reference.clone())
            .or_default()
            .push(resource);
    }

    fn new_scope(&mut self, parent: Option<ScopeId>, options: ScopeOptions) -> ScopeResult<ScopeId> {
        let parent = parent.or(options.parent);
        if options.top && parent.is_some() {
            return Err(ScopeError::construction("a top scope cannot have a parent"));
        }
        let parent_level = match parent {
            Some(parent) => Some(
                self.scope(parent)
                    .ok_or_else(|| {
                        ScopeError::construction(format!("parent scope {parent} does not exist"))
                    })?
                    .level(),
            ),
            None => None,
        };
        let raw = u32::try_from(self.scopes.len())
            .map_err(|_| ScopeError::internal("too many scopes"))?;
        let id = ScopeId::new(raw);

        self.scopes.push(Scope::new(id, options, parent_level));
        if let Some(parent) = parent {
            self.parents.insert(id, parent);
        }
        tracing::debug!(scope = %id, parent = ?parent, "new scope");
        Ok(id)
    }

    fn find_resource(&self, reference: &ResourceRef) -> Option<&Resource> {
        let index = *self.resource_index.get(reference)?;
        self.resources.get(index).map(|(_, resource)| resource)
    }

    fn registry(&self) -> &dyn TypeRegistry {
        &self.registry
    }
}
