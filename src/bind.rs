//! The option binder: environment overrides and flag registration.

use tracing::{debug, trace};

use crate::env::Environment;
use crate::error::FlagenvError;
use crate::infer::Descriptor;
use crate::registrar::Registrar;

/// Bind one option.
///
/// Resolves the field's kind from its declared type, applies the environment
/// override when the variable holds anything but whitespace, then registers
/// the field with `flags`. Empty and whitespace-only variables leave the
/// field untouched and never fail.
pub fn apply<'a>(
    descriptor: Descriptor<'a>,
    env: &dyn Environment,
    flags: &mut dyn Registrar<'a>,
) -> Result<(), FlagenvError> {
    let (mut target, meta) = descriptor.into_target()?;

    let raw = env.var(&meta.env_key).unwrap_or_default();
    if raw.trim().is_empty() {
        if !raw.is_empty() {
            trace!(
                event = "flagenv.bind.env_blank",
                env = %meta.env_key,
                "Ignoring whitespace-only environment value"
            );
        }
    } else {
        target
            .set(&raw)
            .map_err(|source| FlagenvError::EnvironmentParse {
                key: meta.env_key.clone(),
                value: raw.clone(),
                source,
            })?;
        debug!(
            event = "flagenv.bind.env_applied",
            flag = %meta.flag_name,
            env = %meta.env_key,
            kind = target.kind()
        );
    }

    target.register(&meta.flag_name, &meta.help, flags);
    Ok(())
}

/// Apply every descriptor in order, stopping at the first error.
///
/// Options applied before a failure keep their new values.
pub fn apply_all<'a>(
    descriptors: Vec<Descriptor<'a>>,
    env: &dyn Environment,
    flags: &mut dyn Registrar<'a>,
) -> Result<(), FlagenvError> {
    for descriptor in descriptors {
        apply(descriptor, env, flags)?;
    }
    Ok(())
}
