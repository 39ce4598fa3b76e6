//! Registration calls a scope makes into its catalog.
//!
//! These need the catalog mutably and a scope inside it at the same time,
//! so they take the scope by id rather than by reference.

use crate::{
    Catalog, ClassDecl, Resource, ResourceRef, Scope, ScopeError, ScopeId, ScopeKind,
    ScopeOptions, ScopeResult,
};

fn scope_of<C>(catalog: &C, id: ScopeId) -> ScopeResult<&Scope>
where
    C: Catalog + ?Sized,
{
    catalog
        .scope(id)
        .ok_or_else(|| ScopeError::internal(format!("scope {id} is not in the catalog")))
}

fn scope_of_mut<C>(catalog: &mut C, id: ScopeId) -> ScopeResult<&mut Scope>
where
    C: Catalog + ?Sized,
{
    catalog
        .scope_mut(id)
        .ok_or_else(|| ScopeError::internal(format!("scope {id} is not in the catalog")))
}

/// Record `scope` as the evaluation scope of `class`.
///
/// Node bodies turn the scope into a node scope, ordinary classes into a
/// class scope.
pub fn register_class<C>(catalog: &mut C, scope: ScopeId, class: &ClassDecl) -> ScopeResult<()>
where
    C: Catalog + ?Sized,
{
    if class.name.is_empty() {
        return Err(ScopeError::internal(
            "cannot register a class without a qualified name",
        ));
    }

    let target = scope_of_mut(catalog, scope)?;
    if class.is_node() {
        target.set_kind(ScopeKind::Node);
    } else if target.kind() == ScopeKind::Ordinary {
        target.set_kind(ScopeKind::Class);
    }

    tracing::debug!(%scope, class = %class.name, node = class.is_node(), "register class");
    catalog.class_set(&class.name, scope);
    Ok(())
}

/// Store a resource declared in `scope`.
///
/// Exported scopes export their resources; otherwise virtual scopes make
/// them virtual.
pub fn register_resource<C>(
    catalog: &mut C,
    scope: ScopeId,
    mut resource: Resource,
) -> ScopeResult<ResourceRef>
where
    C: Catalog + ?Sized,
{
    let declaring = scope_of(catalog, scope)?;
    if declaring.is_exported() {
        resource.exported = true;
    } else if declaring.is_virtual() {
        resource.is_virtual = true;
    }

    tracing::debug!(
        %scope,
        resource = %resource.reference,
        exported = resource.exported,
        virtual_ = resource.is_virtual,
        "register resource"
    );
    Ok(catalog.store_resource(scope, resource))
}

/// Store an override for a resource that may be declared later.
pub fn register_override<C>(catalog: &mut C, resource: Resource)
where
    C: Catalog + ?Sized,
{
    tracing::debug!(resource = %resource.reference, "register override");
    catalog.store_override(resource);
}

/// Create a child of `parent`.
pub fn child_scope<C>(catalog: &mut C, parent: ScopeId, options: ScopeOptions) -> ScopeResult<ScopeId>
where
    C: Catalog + ?Sized,
{
    scope_of(catalog, parent)?;
    catalog.new_scope(Some(parent), options)
}
