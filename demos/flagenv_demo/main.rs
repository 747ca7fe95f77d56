//! # flagenv demo application
//!
//! A small CLI that binds a config record and prints where it ended up. It
//! exists to exercise flagenv by hand.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagenv_demo
//! FLAGENV_DEMO_QUERY_TIMEOUT=5s cargo run --example flagenv_demo
//! FLAGENV_DEMO_QUERY_TIMEOUT=5s cargo run --example flagenv_demo -- -query.timeout 1m30s
//! cargo run --example flagenv_demo -- -verbose -mac.address aa:bb:cc:dd:ee:ff
//! cargo run --example flagenv_demo -- -json
//! cargo run --example flagenv_demo -- -help
//! ```
//!
//! Set `RUST_LOG=flagenv=trace` to see each field being resolved.

use std::fmt;
use std::process;
use std::time::Duration;

use flagenv::{BoxError, FlagSet, Value};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Hardware address parsed from `aa:bb:cc:dd:ee:ff`.
#[derive(Default)]
struct MacAddr(Option<[u8; 6]>);

impl Value for MacAddr {
    fn set(&mut self, raw: &str) -> Result<(), BoxError> {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() != 6 {
            return Err(format!("expected six octets, got {}", parts.len()).into());
        }
        let mut bytes = [0u8; 6];
        for (byte, part) in bytes.iter_mut().zip(parts) {
            *byte = u8::from_str_radix(part, 16)?;
        }
        self.0 = Some(bytes);
        Ok(())
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bytes) = self.0 else {
            return Ok(());
        };
        let octets: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        f.write_str(&octets.join(":"))
    }
}

struct DemoConfig {
    query_timeout: Duration,
    username: String,
    endpoint: Url,
    retries: isize,
    verbose: bool,
    mac_address: MacAddr,
    json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(30),
            username: "guest".into(),
            endpoint: Url::parse("http://localhost:8080/").unwrap(),
            retries: 3,
            verbose: false,
            mac_address: MacAddr::default(),
            json: false,
        }
    }
}

flagenv::options!(DemoConfig {
    query_timeout => "query.timeout": "how long a query may run",
    username => "username": "user to connect as",
    endpoint => "endpoint": "service base URL",
    retries => "retries": "attempts before giving up",
    verbose => "verbose": "log more",
    mac_address as value => "mac.address": "interface hardware address",
    json => "json": "print the resolved config as JSON",
});

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = DemoConfig::default();
    let mut flags = FlagSet::new("flagenv-demo").about("Show where each setting came from");
    if let Err(err) = flagenv::load("FLAGENV_DEMO", &mut config, Some(&mut flags)) {
        eprintln!("{err}");
        process::exit(2);
    }
    let rest = flags.args().to_vec();
    drop(flags);

    let listing = match flagenv::list("FLAGENV_DEMO", &mut config) {
        Ok(listing) => listing,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&listing) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
    } else {
        println!("{listing}");
    }

    if !rest.is_empty() {
        println!("remaining arguments: {}", rest.join(" "));
    }
}
