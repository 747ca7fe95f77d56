//! Field introspection: turn a record's annotated fields into descriptors.

use std::any::{Any, type_name};
use std::collections::HashSet;

use tracing::trace;

use crate::env::env_key;
use crate::error::FlagenvError;
use crate::target::{Slot, Target};
use crate::value::Value;

/// A configuration record whose fields can be bound.
///
/// Usually implemented with [`options!`](crate::options). A hand-written impl
/// lists the annotated fields in declaration order:
///
/// ```ignore
/// impl flagenv::Options for Config {
///     fn fields(&mut self) -> Vec<flagenv::Field<'_>> {
///         vec![
///             flagenv::Field::new("query.timeout", &mut self.query_timeout),
///             flagenv::Field::settable("mac.address", &mut self.mac),
///         ]
///     }
/// }
/// ```
pub trait Options {
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// One annotated field: its tag, help text and storage.
pub struct Field<'a> {
    tag: &'a str,
    help: &'a str,
    type_name: &'static str,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// A field dispatched on its declared type `T`.
    pub fn new<T: Any>(tag: &'a str, slot: &'a mut T) -> Self {
        Self {
            tag,
            help: "",
            type_name: type_name::<T>(),
            slot: Slot::Any(slot),
        }
    }

    /// A field bound through the settable-value capability.
    pub fn settable<T: Value + 'a>(tag: &'a str, slot: &'a mut T) -> Self {
        Self {
            tag,
            help: "",
            type_name: type_name::<T>(),
            slot: Slot::Settable(slot),
        }
    }

    pub fn help(mut self, help: &'a str) -> Self {
        self.help = help;
        self
    }
}

/// Everything the binder needs to know about one option.
pub struct Descriptor<'a> {
    slot: Slot<'a>,
    env_key: String,
    flag_name: String,
    help: String,
    type_name: &'static str,
}

impl<'a> Descriptor<'a> {
    pub fn flag_name(&self) -> &str {
        &self.flag_name
    }

    pub fn env_key(&self) -> &str {
        &self.env_key
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Declared type of the field.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Resolve the field's kind, consuming the descriptor's storage.
    pub(crate) fn into_target(self) -> Result<(Target<'a>, Meta), FlagenvError> {
        let Descriptor {
            slot,
            env_key,
            flag_name,
            help,
            type_name,
        } = self;
        match Target::resolve(slot) {
            Some(target) => Ok((
                target,
                Meta {
                    env_key,
                    flag_name,
                    help,
                },
            )),
            None => Err(FlagenvError::UnsupportedType {
                flag: flag_name,
                type_name,
            }),
        }
    }
}

/// Names carried alongside a resolved target.
pub(crate) struct Meta {
    pub env_key: String,
    pub flag_name: String,
    pub help: String,
}

/// Build descriptors for every annotated field of `record`.
///
/// Fields with an empty tag are skipped. Fails with
/// [`FlagenvError::ConfigShape`] when two fields share a tag or a tag cannot
/// be used as a flag name.
pub fn infer<'a, C: Options + ?Sized>(
    prefix: &str,
    record: &'a mut C,
) -> Result<Vec<Descriptor<'a>>, FlagenvError> {
    let shape_error = |reason: String| FlagenvError::ConfigShape {
        type_name: type_name::<C>(),
        reason,
    };

    let mut seen = HashSet::new();
    let mut descriptors = Vec::new();
    for field in record.fields() {
        if field.tag.is_empty() {
            continue;
        }
        check_tag(field.tag).map_err(shape_error)?;
        if !seen.insert(field.tag) {
            return Err(shape_error(format!("duplicate tag '{}'", field.tag)));
        }

        let descriptor = Descriptor {
            env_key: env_key(prefix, field.tag),
            flag_name: field.tag.to_string(),
            help: field.help.to_string(),
            type_name: field.type_name,
            slot: field.slot,
        };
        trace!(
            event = "flagenv.infer.option",
            flag = %descriptor.flag_name,
            env = %descriptor.env_key,
            type_name = descriptor.type_name
        );
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

fn check_tag(tag: &str) -> Result<(), String> {
    if tag.starts_with('-') {
        return Err(format!("tag '{tag}' must not start with '-'"));
    }
    if tag.contains('=') || tag.chars().any(char::is_whitespace) {
        return Err(format!("tag '{tag}' must not contain '=' or whitespace"));
    }
    Ok(())
}

/// Implement [`Options`] for a record by listing its annotated fields.
///
/// Each entry maps a field to its tag, with optional help text after a colon.
/// Fields implementing [`Value`] are marked `as value`; everything else is
/// dispatched on its declared type.
///
/// ```ignore
/// struct Config {
///     query_timeout: Duration,
///     user_name: String,
///     mac: MacAddr,
///     cache: Vec<String>,
/// }
///
/// flagenv::options!(Config {
///     query_timeout => "query.timeout": "how long a query may run",
///     user_name => "username",
///     mac as value => "mac.address",
/// });
/// ```
///
/// Fields that are not listed (`cache` above) are invisible to binding.
#[macro_export]
macro_rules! options {
    (@field $tag:expr, $slot:expr, value) => {
        $crate::Field::settable($tag, $slot)
    };
    (@field $tag:expr, $slot:expr,) => {
        $crate::Field::new($tag, $slot)
    };
    ($ty:ty { $( $field:ident $(as $capability:ident)? => $tag:literal $(: $help:literal)? ),* $(,)? }) => {
        impl $crate::Options for $ty {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::options!(@field $tag, &mut self.$field, $($capability)?)
                            $(.help($help))?
                    ),*
                ]
            }
        }
    };
}
