//! Type resolution by fully-qualified name

use tracing::debug;

use crate::hierarchy::is_subclass_of;
use crate::naming::eq_ignore_case;
use crate::provider::ModuleHost;

/// Find a concrete subclass of `root` by full name (ignoring case).
///
/// Only the module that defines `root` is searched. Abstract types, non-class
/// types, and `root` itself never match. Returns `None` for an empty name.
pub fn resolve_subclass<H: ModuleHost + ?Sized>(
    host: &H,
    root: &H::Type,
    full_name: &str,
) -> Option<H::Type> {
    if full_name.is_empty() {
        return None;
    }

    let module = host.module_of(root);
    host.all_types(&module).into_iter().find(|ty| {
        host.is_class(ty)
            && !host.is_abstract(ty)
            && is_subclass_of(host, ty, root)
            && eq_ignore_case(&host.full_name(ty), full_name)
    })
}

/// Find a type by exact full name in a named module.
///
/// If the module loads, only that module is consulted. If loading fails, every
/// loaded module is searched in host order and the first match wins. Returns
/// `None` for an empty type name.
pub fn resolve_by_name<H: ModuleHost + ?Sized>(
    host: &H,
    module_name: &str,
    type_full_name: &str,
) -> Option<H::Type> {
    if type_full_name.is_empty() {
        return None;
    }

    match host.load_module(module_name) {
        Ok(module) => host.type_in(&module, type_full_name),
        Err(err) => {
            debug!(
                module = module_name,
                ty = type_full_name,
                error = %err,
                "module unavailable, searching loaded modules"
            );
            host.loaded_modules()
                .iter()
                .find_map(|module| host.type_in(module, type_full_name))
        }
    }
}
