use thiserror::Error;

/// Boxed error returned by parsers, settable values and registrars.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FlagenvError {
    #[error("Invalid config record {type_name}: {reason}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagenv::config_shape),
            help("tags must be unique and usable as a flag name")
        )
    )]
    ConfigShape {
        type_name: &'static str,
        reason: String,
    },

    #[error("Unsupported field type for '{flag}': {type_name}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(flagenv::unsupported_type),
            help("implement flagenv::Value for the type and declare the field `as value`")
        )
    )]
    UnsupportedType {
        flag: String,
        type_name: &'static str,
    },

    #[error("Parse error {key}={value:?}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagenv::environment_parse)))]
    EnvironmentParse {
        key: String,
        value: String,
        source: BoxError,
    },

    #[error(transparent)]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(flagenv::arguments)))]
    Arguments(BoxError),
}
