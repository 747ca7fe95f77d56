//! Clap-backed flag registrar.
//!
//! [`FlagSet`] is the [`Registrar`] most programs pass to
//! [`load`](crate::load). Each bound field becomes a long flag named after its
//! tag, with the field's post-environment value as the displayed default.
//! Parsing is delegated to [clap](https://docs.rs/clap); values that came from
//! the command line are then written straight into the record.
//!
//! Flags may be spelled `--name value`, `--name=value`, `-name value` or
//! `-name=value`. Boolean flags never consume the next argument: `-verbose`
//! sets `true`, `-verbose=false` sets `false`. Parsing stops at the first
//! positional argument or at `--`; everything from there on is available
//! through [`FlagSet::args`].
//!
//! This module is compiled only with the `clap` Cargo feature (on by
//! default).

use std::time::Duration;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command, value_parser};
use tracing::{debug, warn};

use crate::error::BoxError;
use crate::registrar::Registrar;
use crate::target::Target;
use crate::value::Value;

/// Id of the hidden positional that collects arguments after the flags.
/// Contains whitespace so no tag can collide with it.
const REST: &str = "flagenv rest";

/// A set of command-line flags bound to record fields.
///
/// ```ignore
/// let mut config = Config::default();
/// let mut flags = FlagSet::new("myapp");
/// flagenv::load("MYAPP", &mut config, Some(&mut flags))?;
/// ```
pub struct FlagSet<'a> {
    name: String,
    about: Option<String>,
    flags: Vec<Flag<'a>>,
    args: Vec<String>,
}

struct Flag<'a> {
    name: String,
    help: String,
    target: Target<'a>,
}

impl Flag<'_> {
    fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .value_parser(value_parser!(String))
            .action(ArgAction::Set);
        if !self.help.is_empty() {
            arg = arg.help(self.help.clone());
        }
        arg = if self.target.is_bool() {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.value_name(self.target.kind()).allow_hyphen_values(true)
        };
        let current = self.target.to_string();
        if !current.is_empty() {
            arg = arg.default_value(current);
        }
        arg
    }
}

impl<'a> FlagSet<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            flags: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Description shown at the top of the help output.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Arguments left over after flag parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Registered flag names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|flag| flag.name.as_str())
    }

    /// Rendered help, with current values as defaults.
    pub fn render_help(&self) -> String {
        self.command().render_help().to_string()
    }

    fn push(&mut self, name: &str, help: &str, target: Target<'a>) {
        let flag = Flag {
            name: name.to_string(),
            help: help.to_string(),
            target,
        };
        debug!(
            event = "flagenv.flags.registered",
            flag = name,
            kind = flag.target.kind()
        );
        match self.flags.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => {
                warn!(
                    event = "flagenv.flags.redefined",
                    flag = name,
                    "Flag registered twice, keeping the latest binding"
                );
                *existing = flag;
            }
            None => self.flags.push(flag),
        }
    }

    fn find(&self, name: &str) -> Option<&Flag<'a>> {
        self.flags.iter().find(|flag| flag.name == name)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(self.name.clone())
            .no_binary_name(true)
            .args_override_self(true)
            .disable_version_flag(true);
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        if self.find("help").is_some() {
            command = command.disable_help_flag(true);
        }
        for flag in &self.flags {
            command = command.arg(flag.arg());
        }
        command.arg(
            Arg::new(REST)
                .value_parser(value_parser!(String))
                .action(ArgAction::Append)
                .num_args(1..)
                .trailing_var_arg(true)
                .hide(true),
        )
    }

    /// Rewrite single-dash spellings of registered flags to `--name=value`.
    fn normalize(&self, args: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(args.len());
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            if !arg.starts_with('-') || arg == "-" || arg == "--" {
                out.push(arg);
                out.extend(iter);
                break;
            }

            let body = arg
                .strip_prefix("--")
                .or_else(|| arg.strip_prefix('-'))
                .unwrap_or_default();
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let Some(flag) = self.find(name) else {
                let rewritten = if name == "help" {
                    "--help".to_string()
                } else {
                    arg.clone()
                };
                out.push(rewritten);
                continue;
            };

            let normalized = match inline {
                Some(value) => format!("--{name}={value}"),
                None if flag.target.is_bool() => format!("--{name}"),
                None => match iter.next() {
                    Some(value) => format!("--{name}={value}"),
                    None => format!("--{name}"),
                },
            };
            out.push(normalized);
        }
        out
    }
}

impl<'a> Registrar<'a> for FlagSet<'a> {
    fn string(&mut self, name: &str, slot: &'a mut String, help: &str) {
        self.push(name, help, Target::Text(slot));
    }

    fn bool(&mut self, name: &str, slot: &'a mut bool, help: &str) {
        self.push(name, help, Target::Bool(slot));
    }

    fn int(&mut self, name: &str, slot: &'a mut isize, help: &str) {
        self.push(name, help, Target::Int(slot));
    }

    fn uint64(&mut self, name: &str, slot: &'a mut u64, help: &str) {
        self.push(name, help, Target::Uint64(slot));
    }

    fn int64(&mut self, name: &str, slot: &'a mut i64, help: &str) {
        self.push(name, help, Target::Int64(slot));
    }

    fn float64(&mut self, name: &str, slot: &'a mut f64, help: &str) {
        self.push(name, help, Target::Float64(slot));
    }

    fn duration(&mut self, name: &str, slot: &'a mut Duration, help: &str) {
        self.push(name, help, Target::Duration(slot));
    }

    fn value(&mut self, name: &str, value: Box<dyn Value + 'a>, help: &str) {
        self.push(name, help, Target::Value(value));
    }

    fn parse(&mut self, args: Vec<String>) -> Result<(), BoxError> {
        let args = self.normalize(args);
        let mut command = self.command();
        let matches = command.try_get_matches_from_mut(args)?;

        for flag in &mut self.flags {
            if matches.value_source(&flag.name) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Some(raw) = matches.get_one::<String>(&flag.name) else {
                continue;
            };
            if let Err(err) = flag.target.set(raw) {
                let message = format!("invalid value {raw:?} for flag -{}: {err}", flag.name);
                return Err(Box::new(command.error(ErrorKind::InvalidValue, message)));
            }
            debug!(event = "flagenv.flags.applied", flag = %flag.name);
        }

        self.args = matches
            .get_many::<String>(REST)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::MacAddr;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn clap_kind(err: &BoxError) -> ErrorKind {
        err.downcast_ref::<clap::Error>().unwrap().kind()
    }

    #[test]
    fn single_and_double_dash_spellings() {
        let mut timeout = Duration::ZERO;
        let mut name = String::new();
        let mut count: isize = 0;
        let mut limit: u64 = 0;
        {
            let mut flags = FlagSet::new("test");
            flags.duration("duration", &mut timeout, "");
            flags.string("name", &mut name, "");
            flags.int("count", &mut count, "");
            flags.uint64("limit", &mut limit, "");
            flags
                .parse(args(&[
                    "-duration", "2s", "--name", "x", "-count=-3", "--limit=7",
                ]))
                .unwrap();
        }
        assert_eq!(timeout, Duration::from_secs(2));
        assert_eq!(name, "x");
        assert_eq!(count, -3);
        assert_eq!(limit, 7);
    }

    #[test]
    fn negative_value_as_separate_argument() {
        let mut offset: i64 = 0;
        {
            let mut flags = FlagSet::new("test");
            flags.int64("offset", &mut offset, "");
            flags.parse(args(&["-offset", "-5"])).unwrap();
        }
        assert_eq!(offset, -5);
    }

    #[test]
    fn bool_forms() {
        let mut on = false;
        let mut off = true;
        let mut untouched = true;
        {
            let mut flags = FlagSet::new("test");
            flags.bool("on", &mut on, "");
            flags.bool("off", &mut off, "");
            flags.bool("untouched", &mut untouched, "");
            flags.parse(args(&["-on", "--off=false"])).unwrap();
        }
        assert!(on);
        assert!(!off);
        assert!(untouched);
    }

    #[test]
    fn bool_does_not_consume_next_argument() {
        let mut verbose = false;
        let mut flags = FlagSet::new("test");
        flags.bool("verbose", &mut verbose, "");
        flags.parse(args(&["-verbose", "false"])).unwrap();
        assert_eq!(flags.args(), ["false"]);
        drop(flags);
        assert!(verbose);
    }

    #[test]
    fn last_occurrence_wins() {
        let mut ratio = 0.0;
        {
            let mut flags = FlagSet::new("test");
            flags.float64("ratio", &mut ratio, "");
            flags.parse(args(&["-ratio", "1.5", "-ratio", "2.4"])).unwrap();
        }
        assert_eq!(ratio, 2.4);
    }

    #[test]
    fn unset_flags_keep_current_value() {
        let mut name = "from env".to_string();
        {
            let mut flags = FlagSet::new("test");
            flags.string("name", &mut name, "");
            flags.parse(Vec::new()).unwrap();
        }
        assert_eq!(name, "from env");
    }

    #[test]
    fn parsing_stops_at_first_positional() {
        let mut name = String::new();
        let mut flags = FlagSet::new("test");
        flags.string("name", &mut name, "");
        flags
            .parse(args(&["-name", "a", "serve", "-name", "b"]))
            .unwrap();
        assert_eq!(flags.args(), ["serve", "-name", "b"]);
        drop(flags);
        assert_eq!(name, "a");
    }

    #[test]
    fn double_dash_ends_flags() {
        let mut name = String::new();
        let mut flags = FlagSet::new("test");
        flags.string("name", &mut name, "");
        flags.parse(args(&["--", "-name"])).unwrap();
        assert_eq!(flags.args(), ["-name"]);
        drop(flags);
        assert_eq!(name, "");
    }

    #[test]
    fn settable_value_is_live_backing_store() {
        let mut mac = MacAddr::default();
        {
            let mut flags = FlagSet::new("test");
            flags.value("mac.address", Box::new(&mut mac), "");
            flags
                .parse(args(&["-mac.address", "ff:ee:dd:cc:bb:aa"]))
                .unwrap();
        }
        assert_eq!(mac.to_string(), "ff:ee:dd:cc:bb:aa");
    }

    #[test]
    fn invalid_flag_value_is_a_clap_error() {
        let mut timeout = Duration::from_secs(1);
        {
            let mut flags = FlagSet::new("test");
            flags.duration("duration", &mut timeout, "");
            let err = flags.parse(args(&["-duration", "soon"])).unwrap_err();
            assert_eq!(clap_kind(&err), ErrorKind::InvalidValue);
            assert!(err.to_string().contains("soon"));
        }
        assert_eq!(timeout, Duration::from_secs(1));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let mut flags = FlagSet::new("test");
        let err = flags.parse(args(&["-nope"])).unwrap_err();
        assert_eq!(clap_kind(&err), ErrorKind::UnknownArgument);
    }

    #[test]
    fn missing_value_is_rejected() {
        let mut name = String::new();
        let mut flags = FlagSet::new("test");
        flags.string("name", &mut name, "");
        assert!(flags.parse(args(&["-name"])).is_err());
    }

    #[test]
    fn help_request_surfaces_as_error() {
        let mut flags = FlagSet::new("test");
        let err = flags.parse(args(&["-help"])).unwrap_err();
        assert_eq!(clap_kind(&err), ErrorKind::DisplayHelp);
    }

    #[test]
    fn help_shows_current_values_as_defaults() {
        let mut timeout = Duration::from_secs(90);
        let mut flags = FlagSet::new("test").about("Test program");
        flags.duration("query.timeout", &mut timeout, "How long a query may run");
        let help = flags.render_help();
        assert!(help.contains("Test program"));
        assert!(help.contains("--query.timeout <duration>"));
        assert!(help.contains("How long a query may run"));
        assert!(help.contains("[default: 1m30s]"));
    }

    #[test]
    fn redefinition_keeps_latest_binding() {
        let mut first = String::new();
        let mut second = String::new();
        {
            let mut flags = FlagSet::new("test");
            flags.string("name", &mut first, "");
            flags.string("name", &mut second, "");
            assert_eq!(flags.names().collect::<Vec<_>>(), ["name"]);
            flags.parse(args(&["-name", "x"])).unwrap();
        }
        assert_eq!(first, "");
        assert_eq!(second, "x");
    }

    #[test]
    fn any_usable_tag_can_be_registered() {
        let mut value = String::new();
        let mut rest = String::new();
        {
            let mut flags = FlagSet::new("test");
            flags.string("flagenv::args", &mut value, "");
            flags.string("rest", &mut rest, "");
            flags
                .parse(args(&["--flagenv::args=x", "-rest", "y", "tail"]))
                .unwrap();
            assert_eq!(flags.args(), ["tail"]);
        }
        assert_eq!(value, "x");
        assert_eq!(rest, "y");
    }
}
