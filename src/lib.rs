//! Bind struct fields to defaults, environment variables and command-line
//! flags with one annotation per field.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Config {
//!     query_timeout: Duration,
//!     user_name: String,
//! }
//!
//! flagenv::options!(Config {
//!     query_timeout => "query.timeout",
//!     user_name => "username",
//! });
//!
//! fn main() {
//!     let mut config = Config::default();
//!     let mut flags = flagenv::FlagSet::new("app");
//!     if let Err(err) = flagenv::load("APP", &mut config, Some(&mut flags)) {
//!         eprintln!("{err}");
//!         std::process::exit(2);
//!     }
//! }
//! ```
//!
//! The tag names both the flag and the environment variable. Above, the
//! query timeout can be set with `-query.timeout 5s`, with
//! `APP_QUERY_TIMEOUT=5s`, or by setting the field before calling
//! [`load`].
//!
//! # Precedence
//!
//! ```text
//! Struct default        value in the record before load()
//!        ↑ overridden by
//! Environment variable  PREFIX_TAG
//!        ↑ overridden by
//! Command-line flag     -tag value
//! ```
//!
//! Each layer is applied in place: the environment value is written into the
//! field, then registered as the flag's default, and the registrar writes
//! flag values over it. An environment variable that is empty or holds only
//! whitespace counts as unset; it never fails and never clears a default.
//!
//! # Environment variable names
//!
//! The variable for a tag is the prefix, `_`, and the tag upper-cased with
//! `.` and `-` replaced by `_`:
//!
//! | Prefix | Tag | Variable |
//! |--------|-----|----------|
//! | `APP` | `duration` | `APP_DURATION` |
//! | `APP` | `query.timeout` | `APP_QUERY_TIMEOUT` |
//! | `APP` | `mac-address` | `APP_MAC_ADDRESS` |
//!
//! # Supported field types
//!
//! `String`, `bool`, `isize`, `u64`, `i64`, `f64`, [`std::time::Duration`]
//! (written as `300ms`, `1h30m`, see [`duration`]), [`url::Url`] (absolute
//! URLs only), `Box<dyn Value>`, and any type implementing [`Value`] when
//! the field is declared `as value`. The kind is picked from the field's
//! declared type. A field of any other type fails the whole pass with
//! [`FlagenvError::UnsupportedType`], whether or not a value was supplied.
//!
//! # Records
//!
//! A record is any type implementing [`Options`], normally through
//! [`options!`]. Fields that are not listed are invisible to binding. Tags
//! must be unique and usable on a command line; violations fail with
//! [`FlagenvError::ConfigShape`] before any field is touched.
//!
//! # Flags
//!
//! Flag handling goes through a [`Registrar`]. [`FlagSet`] (feature `clap`,
//! on by default) registers one long flag per field on a
//! [clap](https://docs.rs/clap) command. Passing `None` to [`load`] binds
//! environment variables only and leaves the process arguments alone.
//!
//! # Errors
//!
//! Binding stops at the first error and returns it; fields applied before
//! the failure keep their new values. See [`FlagenvError`]. Nothing is
//! printed: reporting is left to the caller.
//!
//! # Logging
//!
//! The crate emits [tracing](https://docs.rs/tracing) events at `debug` and
//! `trace` level under `flagenv.*` event names. Install a subscriber to see
//! them.

pub mod duration;
pub mod error;

mod bind;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod infer;
mod ops;
mod registrar;
mod target;
mod value;

#[cfg(test)]
mod fixtures;

pub use bind::{apply, apply_all};
pub use builder::{Loader, load};
#[cfg(feature = "clap")]
pub use cli::FlagSet;
pub use env::{Environment, ProcessEnv, env_key};
pub use error::{BoxError, FlagenvError};
pub use infer::{Descriptor, Field, Options, infer};
pub use ops::{Entry, Listing, list};
pub use registrar::{Discard, Registrar};
pub use value::{UrlValue, Value};
