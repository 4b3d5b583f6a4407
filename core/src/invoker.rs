//! Method invocation
//!
//! Arguments are handed through as strings; any parsing happens inside the
//! invoked method. Calls are fire-and-forget.

use anyhow::anyhow;

use crate::error::ConsoleError;
use crate::host::HostNamespace;
use crate::resolver::ResolvedTarget;

/// Invoke a resolved target with string arguments
///
/// Arguments beyond the method's declared parameter count are dropped; too
/// few arguments fail without calling the host.
pub fn invoke<H: HostNamespace>(
    host: &mut H,
    mut resolved: ResolvedTarget<H::Value>,
    args: &[String],
) -> Result<(), ConsoleError> {
    let param_count = resolved.method.param_count;
    let target = format!(
        "{}.{}",
        host.type_name(resolved.type_handle),
        resolved.method.name
    );

    if args.len() < param_count {
        return Err(ConsoleError::InvocationFailed {
            target,
            source: anyhow!("expected {} argument(s), got {}", param_count, args.len()),
        });
    }
    let args = &args[..param_count];

    tracing::trace!("invoking {} with {:?}", target, args);

    host.call(&resolved.method, &mut resolved.instance, args)
        .map_err(|source| ConsoleError::InvocationFailed { target, source })
}
