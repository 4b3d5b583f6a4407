//! Target resolution
//!
//! Turns a `Type.Method` reference plus an argument count into a concrete
//! receiver and method overload. Nothing is cached: every command resolves
//! again, so instance existence is always read back from the host.

use crate::error::ConsoleError;
use crate::host::{HostNamespace, MethodHandle, ObjectRef, TypeHandle, TypeKind};

/// A receiver and overload ready to invoke
#[derive(Debug)]
pub struct ResolvedTarget<V> {
    pub type_handle: TypeHandle,
    pub instance: ObjectRef<V>,
    pub method: MethodHandle,
}

/// Split a target reference into `(type_name, method_name)`
pub fn parse_target(target: &str) -> Result<(&str, &str), ConsoleError> {
    let mut parts = target.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(type_name), Some(method_name), None) => Ok((type_name, method_name)),
        _ => Err(ConsoleError::MalformedTarget {
            target: target.to_string(),
        }),
    }
}

/// Resolve `target` for a call with `arg_count` arguments
///
/// The receiver is obtained before the method is looked up, so a live
/// component may be created even when the method then turns out to be
/// missing.
pub fn resolve<H: HostNamespace>(
    host: &mut H,
    target: &str,
    arg_count: usize,
) -> Result<ResolvedTarget<H::Value>, ConsoleError> {
    let (type_name, method_name) = parse_target(target)?;

    let type_handle = host
        .lookup_type(type_name)
        .ok_or_else(|| ConsoleError::TypeNotFound {
            type_name: type_name.to_string(),
        })?;

    let instance = obtain_instance(host, type_handle)?;
    let method = select_overload(host, type_handle, method_name, arg_count)?;

    Ok(ResolvedTarget {
        type_handle,
        instance,
        method,
    })
}

/// Find or create the receiver for a call on `ty`
fn obtain_instance<H: HostNamespace>(
    host: &mut H,
    ty: TypeHandle,
) -> Result<ObjectRef<H::Value>, ConsoleError> {
    let no_constructor = |host: &H| ConsoleError::NoDefaultConstructor {
        type_name: host.type_name(ty).to_string(),
    };

    match host.type_kind(ty) {
        TypeKind::LiveComponent => {
            if let Some(id) = host.find_live_instance(ty) {
                return Ok(ObjectRef::Live(id));
            }

            let Some(id) = host.create_live_instance(ty) else {
                return Err(no_constructor(host));
            };
            tracing::info!("{} has been created", host.type_name(ty));
            Ok(ObjectRef::Live(id))
        }
        TypeKind::Plain => {
            let Some(value) = host.construct(ty) else {
                return Err(no_constructor(host));
            };
            tracing::info!("a new instance of {} has been created", host.type_name(ty));
            Ok(ObjectRef::Owned(value))
        }
    }
}

/// Pick the overload of `method_name` taking `arg_count` parameters
///
/// The first match in enumeration order wins. If arguments were supplied but
/// no overload takes that many, a zero-parameter overload is accepted and the
/// arguments are dropped at invocation.
fn select_overload<H: HostNamespace>(
    host: &H,
    ty: TypeHandle,
    method_name: &str,
    arg_count: usize,
) -> Result<MethodHandle, ConsoleError> {
    let named: Vec<MethodHandle> = host
        .list_methods(ty)
        .into_iter()
        .filter(|m| m.name == method_name)
        .collect();

    if let Some(exact) = named.iter().find(|m| m.param_count == arg_count) {
        return Ok(exact.clone());
    }

    if arg_count > 0
        && let Some(nullary) = named.iter().find(|m| m.param_count == 0)
    {
        tracing::debug!(
            "{}.{} takes no parameters, discarding {} argument(s)",
            host.type_name(ty),
            method_name,
            arg_count
        );
        return Ok(nullary.clone());
    }

    Err(ConsoleError::MethodNotFound {
        type_name: host.type_name(ty).to_string(),
        method: method_name.to_string(),
        arg_count,
    })
}
