//! Scopes and variable resolution.
//!
//! Each class, defined-type instance and node body is evaluated in its own
//! [`Scope`]. Scopes form a tree rooted at the top scope (level 1); the
//! [`Catalog`] owns every node and a scope only remembers its parent's id,
//! resolved from the catalog on first use.
//!
//! # Resolution
//!
//! - Unqualified names (`x`) walk from the scope towards the root.
//! - Qualified names (`apache::params::user`) resolve the class part through
//!   the namespace search path, jump to that class's scope, and look the
//!   short name up from there, including that scope's own ancestors.
//! - A leading `::` (`::x`) starts from the top scope.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use bitflags::bitflags;

use kestrel_diagnostic::SourceLocation;

use crate::defaults::DefaultTable;
use crate::symbols::SymbolTable;
use crate::{
    Catalog, ClassDecl, DefineDecl, Lookup, LookupMode, Resource, ResourceRef, ScopeError,
    ScopeOptions, ScopeResult, TransportNode, TypeDecl, Value,
};

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Handle to a scope owned by a [`Catalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ScopeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a scope was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScopeKind {
    /// Top scope or defined-type instance.
    #[default]
    Ordinary,
    /// Body of a class.
    Class,
    /// Body of a node definition.
    Node,
}

bitflags! {
    /// Independent boolean properties of a scope.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ScopeFlags: u8 {
        /// Resources declared here are exported.
        const EXPORTED = 1 << 0;
        /// Resources declared here are virtual.
        const VIRTUAL = 1 << 1;
        /// Already handed to the serializer.
        const TRANSLATED = 1 << 2;
    }
}

/// Variable, default and tag state for one unit of configuration.
#[derive(Clone, Debug)]
pub struct Scope {
    pub(crate) id: ScopeId,
    level: u32,
    namespaces: Vec<String>,
    pub(crate) symbols: SymbolTable,
    pub(crate) defaults: DefaultTable,
    pub(crate) tags: BTreeSet<String>,
    kind: ScopeKind,
    type_name: Option<String>,
    name: Option<String>,
    source: Option<String>,
    keyword: Option<String>,
    flags: ScopeFlags,
    /// Parent id, fetched from the catalog on first use.
    parent: OnceCell<Option<ScopeId>>,
}

impl Scope {
    /// Build a scope from validated options.
    ///
    /// `parent_level` is the level of the parent scope, if any. An explicit
    /// `level` option wins, then `top`, then `parent_level + 1`.
    pub fn new(id: ScopeId, options: ScopeOptions, parent_level: Option<u32>) -> Self {
        let level = match (options.level, options.top, parent_level) {
            (Some(level), _, _) => level,
            (None, true, _) | (None, false, None) => 1,
            (None, false, Some(parent)) => parent.saturating_add(1),
        };

        let mut flags = ScopeFlags::empty();
        flags.set(ScopeFlags::EXPORTED, options.exported);
        flags.set(ScopeFlags::VIRTUAL, options.is_virtual);
        flags.set(ScopeFlags::TRANSLATED, options.translated);

        let mut scope = Scope {
            id,
            level,
            namespaces: vec![String::new()],
            symbols: SymbolTable::new(),
            defaults: DefaultTable::default(),
            tags: BTreeSet::new(),
            kind: ScopeKind::Ordinary,
            type_name: options.type_name,
            name: options.name,
            source: options.source,
            keyword: options.keyword,
            flags,
            parent: OnceCell::new(),
        };
        if let Some(namespace) = options.namespace {
            scope.add_namespace(namespace);
        }
        scope
    }

    // Identity

    #[inline]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The root scope is the only one at level 1.
    #[inline]
    pub fn is_top(&self) -> bool {
        self.level == 1
    }

    #[inline]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_node_scope(&self) -> bool {
        self.kind == ScopeKind::Node
    }

    pub(crate) fn set_kind(&mut self, kind: ScopeKind) {
        self.kind = kind;
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    // Flags

    pub fn flags(&self) -> ScopeFlags {
        self.flags
    }

    pub fn is_exported(&self) -> bool {
        self.flags.contains(ScopeFlags::EXPORTED)
    }

    pub fn set_exported(&mut self, exported: bool) {
        self.flags.set(ScopeFlags::EXPORTED, exported);
    }

    /// True when the scope is virtual or exported.
    pub fn is_virtual(&self) -> bool {
        self.flags
            .intersects(ScopeFlags::VIRTUAL | ScopeFlags::EXPORTED)
    }

    pub fn set_virtual(&mut self, is_virtual: bool) {
        self.flags.set(ScopeFlags::VIRTUAL, is_virtual);
    }

    pub fn is_translated(&self) -> bool {
        self.flags.contains(ScopeFlags::TRANSLATED)
    }

    pub fn mark_translated(&mut self) {
        self.flags.insert(ScopeFlags::TRANSLATED);
    }

    // Namespaces

    /// Namespace search path, tried in order when resolving class names.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Add a namespace to the search path.
    ///
    /// Returns `false` if it is already present. The initial global-only
    /// path `[""]` is replaced by the first namespace added.
    pub fn add_namespace(&mut self, namespace: impl Into<String>) -> bool {
        let namespace = namespace.into();
        if self.namespaces.contains(&namespace) {
            return false;
        }
        if self.namespaces.len() == 1 && self.namespaces[0].is_empty() {
            self.namespaces[0] = namespace;
        } else {
            self.namespaces.push(namespace);
        }
        true
    }

    /// Find a class through the namespace search path.
    pub fn find_class<'c, C>(&self, catalog: &'c C, name: &str) -> Option<&'c ClassDecl>
    where
        C: Catalog + ?Sized,
    {
        let registry = catalog.registry();
        self.namespaces
            .iter()
            .find_map(|namespace| registry.find_class(namespace, name))
    }

    /// Find a defined type through the namespace search path.
    pub fn find_defined_type<'c, C>(&self, catalog: &'c C, name: &str) -> Option<&'c DefineDecl>
    where
        C: Catalog + ?Sized,
    {
        let registry = catalog.registry();
        self.namespaces
            .iter()
            .find_map(|namespace| registry.find_defined_type(namespace, name))
    }

    /// Resolve a type name, preferring defined types over classes.
    pub fn lookup_type<'c, C>(&self, catalog: &'c C, name: &str) -> Option<TypeDecl<'c>>
    where
        C: Catalog + ?Sized,
    {
        self.find_defined_type(catalog, name)
            .map(TypeDecl::Define)
            .or_else(|| self.find_class(catalog, name).map(TypeDecl::Class))
    }

    // Tree navigation

    /// Parent id, asked of the catalog once and then cached.
    pub fn parent_id<C>(&self, catalog: &C) -> Option<ScopeId>
    where
        C: Catalog + ?Sized,
    {
        *self.parent.get_or_init(|| catalog.parent(self.id))
    }

    /// The parent scope, or `None` for the root.
    pub fn parent_scope<'c, C>(&self, catalog: &'c C) -> ScopeResult<Option<&'c Scope>>
    where
        C: Catalog + ?Sized,
    {
        match self.parent_id(catalog) {
            None => Ok(None),
            Some(id) => catalog.scope(id).map(Some).ok_or_else(|| {
                ScopeError::internal(format!("parent {id} of {self} is not in the catalog"))
            }),
        }
    }

    /// The root of this scope's tree.
    pub fn top_scope<'c, C>(&'c self, catalog: &'c C) -> ScopeResult<&'c Scope>
    where
        C: Catalog + ?Sized,
    {
        let mut current = self;
        while let Some(parent) = current.parent_scope(catalog)? {
            current = parent;
        }
        Ok(current)
    }

    // Variables

    /// Bind a variable in this scope. Names are write-once per scope.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        location: SourceLocation,
    ) -> ScopeResult<()> {
        let name = name.into();
        tracing::trace!(scope = %self.id, %name, "set variable");
        self.symbols.set(name, value.into(), location)
    }

    /// Remove a local binding. Only for test and debug resets.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.symbols.unset(name)
    }

    /// The value bound in this scope alone.
    pub fn local_value(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// Resolve a variable reference.
    #[tracing::instrument(level = "trace", skip(self, catalog), fields(scope = %self.id))]
    pub fn lookup<C>(&self, catalog: &C, name: &str, mode: LookupMode) -> ScopeResult<Lookup>
    where
        C: Catalog + ?Sized,
    {
        if let Some((qualifier, short)) = name.rsplit_once(NAMESPACE_SEPARATOR) {
            return self.lookup_qualified(catalog, qualifier, short, name, mode);
        }

        if let Some(value) = self.symbols.get(name) {
            return Ok(match (value, mode) {
                (Value::Undef, LookupMode::AsString) => Lookup::Value(Value::empty()),
                _ => Lookup::Value(value.clone()),
            });
        }

        match self.parent_scope(catalog)? {
            Some(parent) => parent.lookup(catalog, name, mode),
            None => Ok(match mode {
                LookupMode::AsString => Lookup::Value(Value::empty()),
                LookupMode::Raw => Lookup::Undefined,
            }),
        }
    }

    /// Resolve a variable reference to its interpolated string form.
    pub fn lookup_string<C>(&self, catalog: &C, name: &str) -> ScopeResult<String>
    where
        C: Catalog + ?Sized,
    {
        Ok(self
            .lookup(catalog, name, LookupMode::AsString)?
            .to_interpolated())
    }

    fn lookup_qualified<C>(
        &self,
        catalog: &C,
        qualifier: &str,
        short: &str,
        full: &str,
        mode: LookupMode,
    ) -> ScopeResult<Lookup>
    where
        C: Catalog + ?Sized,
    {
        if qualifier.is_empty() {
            return self.top_scope(catalog)?.lookup(catalog, short, mode);
        }

        let Some(class) = self.find_class(catalog, qualifier) else {
            return Err(ScopeError::UnresolvedClass {
                class: qualifier.to_string(),
                variable: full.to_string(),
            });
        };
        let Some(class_scope) = catalog.class_scope(&class.name) else {
            return Err(ScopeError::UnevaluatedClass {
                class: class.name.clone(),
                variable: full.to_string(),
            });
        };
        let scope = catalog.scope(class_scope).ok_or_else(|| {
            ScopeError::internal(format!(
                "scope {class_scope} of class `{}` is not in the catalog",
                class.name
            ))
        })?;
        scope.lookup(catalog, short, mode)
    }

    /// Variables visible from this scope.
    ///
    /// With `recursive`, ancestors' bindings are included and closer
    /// bindings win; otherwise only local bindings are returned.
    pub fn variables<C>(&self, catalog: &C, recursive: bool) -> ScopeResult<BTreeMap<String, Value>>
    where
        C: Catalog + ?Sized,
    {
        let mut visible = match self.parent_scope(catalog)? {
            Some(parent) if recursive => parent.variables(catalog, true)?,
            _ => BTreeMap::new(),
        };
        for (name, value) in self.symbols.iter() {
            visible.insert(name.to_string(), value.clone());
        }
        Ok(visible)
    }

    // Resources and output

    /// Find a declared resource through the catalog.
    pub fn find_resource<'c, C>(&self, catalog: &'c C, reference: &ResourceRef) -> Option<&'c Resource>
    where
        C: Catalog + ?Sized,
    {
        catalog.find_resource(reference)
    }

    /// Minimal transport node for the serializer.
    ///
    /// The empty type is the main scope; a scope with no type at all is a
    /// compiler bug.
    pub fn to_transport(&self) -> ScopeResult<TransportNode> {
        let type_name = match self.type_name.as_deref() {
            None => {
                return Err(ScopeError::internal(format!(
                    "scope {} has no type",
                    self.id
                )))
            }
            Some("") => "main",
            Some(type_name) => type_name,
        };
        Ok(TransportNode {
            type_name: type_name.to_string(),
            name: self.name.clone(),
        })
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = match self.type_name.as_deref() {
            Some("") => Some("main"),
            other => other,
        };
        match (type_name, self.name.as_deref()) {
            (Some(t), Some(n)) => write!(f, "Scope({t}[{n}])"),
            (Some(t), None) => write!(f, "Scope({t})"),
            (None, _) => write!(f, "Scope({})", self.id),
        }
    }
}
