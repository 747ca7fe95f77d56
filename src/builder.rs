use tracing::debug;

use crate::bind;
use crate::env::{Environment, ProcessEnv};
use crate::error::FlagenvError;
use crate::infer::{self, Options};
use crate::registrar::{Discard, Registrar};

/// Bind `record` to environment variables and, when `flags` is given,
/// command-line flags.
///
/// Reads the process environment and the process arguments (program name
/// excluded). Fields resolve in the order struct default → environment
/// variable `{PREFIX}_{TAG}` → flag `-{tag}`.
///
/// ```ignore
/// let mut config = Config::default();
/// let mut flags = flagenv::FlagSet::new("myapp");
/// flagenv::load("MYAPP", &mut config, Some(&mut flags))?;
/// ```
///
/// Only records can be bound. A type without [`Options`] is rejected at
/// compile time:
///
/// ```compile_fail,E0277
/// let mut port = 8080u32;
/// flagenv::load("APP", &mut port, None)?;
/// # Ok::<(), flagenv::FlagenvError>(())
/// ```
///
/// and so is a record passed by value:
///
/// ```compile_fail,E0308
/// struct Config {
///     name: String,
/// }
/// flagenv::options!(Config { name => "name" });
///
/// let config = Config { name: String::new() };
/// flagenv::load("APP", config, None)?;
/// # Ok::<(), flagenv::FlagenvError>(())
/// ```
pub fn load<'a, C: Options + ?Sized>(
    prefix: &str,
    record: &'a mut C,
    flags: Option<&mut dyn Registrar<'a>>,
) -> Result<(), FlagenvError> {
    Loader::new(prefix).load(record, flags)
}

/// Builder for a binding pass with injected environment and arguments.
///
/// Defaults to the process environment and process arguments:
///
/// ```ignore
/// let env = HashMap::from([("APP_PORT", "8080")]);
/// Loader::new("APP")
///     .env(env)
///     .args(["-verbose"])
///     .load(&mut config, Some(&mut flags))?;
/// ```
pub struct Loader<E = ProcessEnv> {
    prefix: String,
    env: E,
    args: Option<Vec<String>>,
}

impl Loader {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            env: ProcessEnv,
            args: None,
        }
    }
}

impl<E: Environment> Loader<E> {
    /// Replace the environment lookup (default: the process environment).
    pub fn env<F: Environment>(self, env: F) -> Loader<F> {
        Loader {
            prefix: self.prefix,
            env,
            args: self.args,
        }
    }

    /// Replace the argument list handed to the registrar (default: the
    /// process arguments without the program name).
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The argument list `load` will parse.
    fn effective_args(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Run the binding pass.
    ///
    /// Without `flags`, registrations go to a [`Discard`] registrar and the
    /// arguments are never parsed. With `flags`, the registrar parses the
    /// arguments once every option is registered; its error is returned
    /// unchanged as [`FlagenvError::Arguments`].
    pub fn load<'a, C: Options + ?Sized>(
        &self,
        record: &'a mut C,
        flags: Option<&mut dyn Registrar<'a>>,
    ) -> Result<(), FlagenvError> {
        let descriptors = infer::infer(&self.prefix, record)?;
        debug!(
            event = "flagenv.load.started",
            prefix = %self.prefix,
            options = descriptors.len(),
            flags = flags.is_some()
        );

        match flags {
            Some(flags) => {
                bind::apply_all(descriptors, &self.env, &mut *flags)?;
                flags
                    .parse(self.effective_args())
                    .map_err(FlagenvError::Arguments)?;
            }
            None => bind::apply_all(descriptors, &self.env, &mut Discard)?,
        }

        debug!(event = "flagenv.load.completed", prefix = %self.prefix);
        Ok(())
    }
}
