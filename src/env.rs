use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Characters in a tag that map to the environment separator.
const FLAG_SEPARATORS: [char; 2] = ['.', '-'];
const ENV_SEPARATOR: &str = "_";

/// Derive the environment variable name for a tag.
///
/// The tag is upper-cased and `.`/`-` become `_`, then joined to the prefix
/// with `_`: prefix `APP` and tag `query.timeout` give `APP_QUERY_TIMEOUT`.
pub fn env_key(prefix: &str, tag: &str) -> String {
    let normalized = tag.to_uppercase().replace(FLAG_SEPARATORS, ENV_SEPARATOR);
    format!("{prefix}{ENV_SEPARATOR}{normalized}")
}

/// Read-only lookup of environment variables.
///
/// Implemented for the process environment and for in-memory maps, so tests
/// can pass synthetic data instead of touching `std::env`.
pub trait Environment {
    /// The value of `key`, or `None` when it is not set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment. Variables that are not valid unicode read as
/// unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<K, V, S> Environment for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.as_ref().to_string())
    }
}

impl<K, V> Environment for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.as_ref().to_string())
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
