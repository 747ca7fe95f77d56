//! The settable-value capability and the URL adapter.
//!
//! [`Value`] is how types outside the built-in set take part in binding: the
//! engine hands the raw environment or flag text to [`Value::set`] and shows
//! the value through its `Display` impl. The same value is registered with
//! the flag registrar as the live backing store, so a flag writes straight
//! into the record field.

use std::fmt;

use url::Url;

use crate::error::BoxError;

/// A field that can be parsed from text and rendered back.
///
/// ```ignore
/// struct MacAddr(Option<[u8; 6]>);
///
/// impl flagenv::Value for MacAddr {
///     fn set(&mut self, raw: &str) -> Result<(), flagenv::BoxError> {
///         self.0 = Some(parse_mac(raw)?);
///         Ok(())
///     }
/// }
/// ```
pub trait Value: fmt::Display {
    /// Replace the current value with the one parsed from `raw`.
    fn set(&mut self, raw: &str) -> Result<(), BoxError>;
}

impl<T: Value + ?Sized> Value for &mut T {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        (**self).set(raw)
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        (**self).set(raw)
    }
}

/// Writes parsed URLs through to a `Url` field owned by the record.
///
/// Registrars only accept complex kinds through [`Value`], so URL fields are
/// registered through this adapter instead of a private copy.
pub struct UrlValue<'a> {
    url: &'a mut Url,
}

impl<'a> UrlValue<'a> {
    pub fn new(url: &'a mut Url) -> Self {
        Self { url }
    }
}

impl Value for UrlValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        *self.url = Url::parse(raw)?;
        Ok(())
    }
}

impl fmt::Display for UrlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
