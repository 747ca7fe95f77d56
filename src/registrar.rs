//! The flag-registration collaborator.
//!
//! A [`Registrar`] receives one call per bound field, with exclusive access
//! to the field for as long as the registrar lives. The field already holds
//! its post-environment value, which the registrar shows as the flag's
//! default. [`Registrar::parse`] later writes command-line values straight
//! into those fields.
//!
//! The crate ships [`FlagSet`](crate::FlagSet) (clap-backed, feature `clap`)
//! and [`Discard`], which accepts registrations and never parses anything.

use std::time::Duration;

use crate::error::BoxError;
use crate::value::Value;

pub trait Registrar<'a> {
    fn string(&mut self, name: &str, slot: &'a mut String, help: &str);
    fn bool(&mut self, name: &str, slot: &'a mut bool, help: &str);
    fn int(&mut self, name: &str, slot: &'a mut isize, help: &str);
    fn uint64(&mut self, name: &str, slot: &'a mut u64, help: &str);
    fn int64(&mut self, name: &str, slot: &'a mut i64, help: &str);
    fn float64(&mut self, name: &str, slot: &'a mut f64, help: &str);
    fn duration(&mut self, name: &str, slot: &'a mut Duration, help: &str);

    /// Register a settable value as the flag's live backing store.
    fn value(&mut self, name: &str, value: Box<dyn Value + 'a>, help: &str);

    /// Parse `args` (program name excluded) and write flag values into the
    /// registered fields.
    fn parse(&mut self, args: Vec<String>) -> Result<(), BoxError>;
}

/// Registrar for environment-only binding: registrations are dropped and
/// parsing is a no-op.
#[derive(Debug, Default)]
pub struct Discard;

impl<'a> Registrar<'a> for Discard {
    fn string(&mut self, _name: &str, _slot: &'a mut String, _help: &str) {}
    fn bool(&mut self, _name: &str, _slot: &'a mut bool, _help: &str) {}
    fn int(&mut self, _name: &str, _slot: &'a mut isize, _help: &str) {}
    fn uint64(&mut self, _name: &str, _slot: &'a mut u64, _help: &str) {}
    fn int64(&mut self, _name: &str, _slot: &'a mut i64, _help: &str) {}
    fn float64(&mut self, _name: &str, _slot: &'a mut f64, _help: &str) {}
    fn duration(&mut self, _name: &str, _slot: &'a mut Duration, _help: &str) {}
    fn value(&mut self, _name: &str, _value: Box<dyn Value + 'a>, _help: &str) {}

    fn parse(&mut self, _args: Vec<String>) -> Result<(), BoxError> {
        Ok(())
    }
}
