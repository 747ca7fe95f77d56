//! Supported value kinds and their text parsers.
//!
//! A [`Target`] is the typed view of one field's storage. It is resolved from
//! the field's declared type, never from its current value.

use std::any::Any;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::duration;
use crate::error::BoxError;
use crate::registrar::Registrar;
use crate::value::{UrlValue, Value};

/// Exclusive reference to a field, as captured by the introspector.
pub(crate) enum Slot<'a> {
    /// Dispatched on the field's declared type.
    Any(&'a mut dyn Any),
    /// Field registered through the settable-value capability.
    Settable(&'a mut dyn Value),
}

/// Typed, exclusive reference to a field's storage.
pub(crate) enum Target<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    Int(&'a mut isize),
    Uint64(&'a mut u64),
    Int64(&'a mut i64),
    Float64(&'a mut f64),
    Duration(&'a mut Duration),
    Url(&'a mut Url),
    Value(Box<dyn Value + 'a>),
}

impl<'a> Target<'a> {
    /// Resolve the kind of a slot. `None` when the declared type is not
    /// supported.
    pub(crate) fn resolve(slot: Slot<'a>) -> Option<Self> {
        match slot {
            Slot::Settable(value) => Some(Target::Value(Box::new(value))),
            Slot::Any(any) => Self::from_any(any),
        }
    }

    fn from_any(any: &'a mut dyn Any) -> Option<Self> {
        if any.is::<String>() {
            any.downcast_mut().map(Target::Text)
        } else if any.is::<bool>() {
            any.downcast_mut().map(Target::Bool)
        } else if any.is::<isize>() {
            any.downcast_mut().map(Target::Int)
        } else if any.is::<u64>() {
            any.downcast_mut().map(Target::Uint64)
        } else if any.is::<i64>() {
            any.downcast_mut().map(Target::Int64)
        } else if any.is::<f64>() {
            any.downcast_mut().map(Target::Float64)
        } else if any.is::<Duration>() {
            any.downcast_mut().map(Target::Duration)
        } else if any.is::<Url>() {
            any.downcast_mut().map(Target::Url)
        } else if any.is::<Box<dyn Value>>() {
            any.downcast_mut::<Box<dyn Value>>()
                .map(|boxed| Target::Value(Box::new(&mut **boxed)))
        } else {
            None
        }
    }

    /// Short kind name, used as the flag's value placeholder.
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Text(_) => "string",
            Target::Bool(_) => "bool",
            Target::Int(_) => "int",
            Target::Uint64(_) => "uint64",
            Target::Int64(_) => "int64",
            Target::Float64(_) => "float64",
            Target::Duration(_) => "duration",
            Target::Url(_) => "url",
            Target::Value(_) => "value",
        }
    }

    #[cfg(feature = "clap")]
    pub fn is_bool(&self) -> bool {
        matches!(self, Target::Bool(_))
    }

    /// Parse `raw` and store it. Built-in kinds are only written when parsing
    /// succeeds.
    pub fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        match self {
            Target::Text(slot) => **slot = raw.to_string(),
            Target::Bool(slot) => **slot = parse_bool(raw)?,
            Target::Int(slot) => **slot = raw.parse()?,
            Target::Uint64(slot) => **slot = raw.parse()?,
            Target::Int64(slot) => **slot = raw.parse()?,
            Target::Float64(slot) => **slot = raw.parse()?,
            Target::Duration(slot) => **slot = duration::parse(raw)?,
            Target::Url(slot) => **slot = Url::parse(raw)?,
            Target::Value(value) => value.set(raw)?,
        }
        Ok(())
    }

    /// Hand the storage over to a registrar.
    pub(crate) fn register(self, name: &str, help: &str, flags: &mut dyn Registrar<'a>) {
        match self {
            Target::Text(slot) => flags.string(name, slot, help),
            Target::Bool(slot) => flags.bool(name, slot, help),
            Target::Int(slot) => flags.int(name, slot, help),
            Target::Uint64(slot) => flags.uint64(name, slot, help),
            Target::Int64(slot) => flags.int64(name, slot, help),
            Target::Float64(slot) => flags.float64(name, slot, help),
            Target::Duration(slot) => flags.duration(name, slot, help),
            Target::Url(slot) => flags.value(name, Box::new(UrlValue::new(slot)), help),
            Target::Value(value) => flags.value(name, value, help),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Text(slot) => f.write_str(slot),
            Target::Bool(slot) => write!(f, "{slot}"),
            Target::Int(slot) => write!(f, "{slot}"),
            Target::Uint64(slot) => write!(f, "{slot}"),
            Target::Int64(slot) => write!(f, "{slot}"),
            Target::Float64(slot) => write!(f, "{slot}"),
            Target::Duration(slot) => f.write_str(&duration::format(**slot)),
            Target::Url(slot) => f.write_str(slot.as_str()),
            Target::Value(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid boolean {0:?}")]
pub struct InvalidBool(String);

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, InvalidBool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(InvalidBool(raw.to_string())),
    }
}
