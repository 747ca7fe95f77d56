use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use flagenv::{BoxError, FlagSet, Loader, Value};
use url::Url;

#[derive(Default)]
struct Level(u8);

impl Value for Level {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        self.0 = raw.parse()?;
        Ok(())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Config {
    timeout: Duration,
    endpoint: Url,
    level: Level,
    extra: Box<dyn Value>,
    internal: Vec<String>,
}

flagenv::options!(Config {
    timeout => "query.timeout": "how long a query may run",
    endpoint => "endpoint",
    level as value => "level": "verbosity",
    extra => "extra",
});

fn main() -> Result<(), flagenv::FlagenvError> {
    let mut config = Config {
        timeout: Duration::from_secs(1),
        endpoint: Url::parse("http://localhost/").expect("valid url"),
        level: Level::default(),
        extra: Box::new(Level::default()),
        internal: Vec::new(),
    };
    let env: HashMap<String, String> = HashMap::new();

    let mut flags = FlagSet::new("record");
    Loader::new("APP")
        .env(env)
        .args(Vec::<String>::new())
        .load(&mut config, Some(&mut flags))?;
    drop(flags);

    flagenv::load("APP", &mut config, None)?;
    let listing = flagenv::list("APP", &mut config)?;
    assert_eq!(listing.entries.len(), 4);
    assert!(config.internal.is_empty());
    Ok(())
}
