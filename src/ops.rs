//! Option listing: what each option is called and what it currently holds.
//!
//! Backs "show me the effective configuration" style commands. The listing is
//! read-only; call it after [`load`](crate::load) to see resolved values.

use std::fmt;

use serde::Serialize;

use crate::error::FlagenvError;
use crate::infer::{self, Options};

/// One option in a [`Listing`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub flag: String,
    pub env: String,
    pub kind: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub help: String,
}

/// Every option of a record, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "-{} ({}) = {}", entry.flag, entry.env, entry.value)?;
        }
        Ok(())
    }
}

/// List the options of `record` with their current values.
///
/// Fails like [`load`](crate::load) on shape errors and unsupported types.
pub fn list<C: Options + ?Sized>(prefix: &str, record: &mut C) -> Result<Listing, FlagenvError> {
    let mut entries = Vec::new();
    for descriptor in infer::infer(prefix, record)? {
        let (target, meta) = descriptor.into_target()?;
        entries.push(Entry {
            flag: meta.flag_name,
            env: meta.env_key,
            kind: target.kind(),
            value: target.to_string(),
            help: meta.help,
        });
    }
    Ok(Listing { entries })
}
