#[cfg(test)]
pub mod test {
    use std::fmt;
    use std::time::Duration;

    use url::Url;

    use crate::error::BoxError;
    use crate::value::Value;

    /// One field of every built-in kind.
    #[derive(Debug, PartialEq)]
    pub struct Config {
        pub string: String,
        pub int: isize,
        pub int64: i64,
        pub uint64: u64,
        pub float64: f64,
        pub duration: Duration,
        pub url: Url,
        pub bool: bool,
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                string: String::new(),
                int: 0,
                int64: 0,
                uint64: 0,
                float64: 0.0,
                duration: Duration::ZERO,
                url: Url::parse("http://localhost/").unwrap(),
                bool: false,
            }
        }
    }

    crate::options!(Config {
        string => "string",
        int => "int",
        int64 => "int64",
        uint64 => "uint64",
        float64 => "float64",
        duration => "duration",
        url => "url",
        bool => "bool",
    });

    /// A user-defined type with the settable-value capability.
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    pub struct MacAddr(Option<[u8; 6]>);

    impl Value for MacAddr {
        fn set(&mut self, raw: &str) -> Result<(), BoxError> {
            let mut bytes = [0u8; 6];
            let mut parts = raw.split(':');
            for byte in &mut bytes {
                let part = parts.next().ok_or("too few octets")?;
                if part.len() != 2 {
                    return Err(format!("invalid octet {part:?}").into());
                }
                *byte = u8::from_str_radix(part, 16)?;
            }
            if parts.next().is_some() {
                return Err("too many octets".into());
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
            for (i, byte) in bytes.iter().enumerate() {
                if i > 0 {
                    f.write_str(":")?;
                }
                write!(f, "{byte:02x}")?;
            }
            Ok(())
        }
    }

    /// An integer-based type with no parser.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Port(pub u16);

    #[test]
    fn mac_round_trips() {
        let mut mac = MacAddr::default();
        assert_eq!(mac.to_string(), "");
        mac.set("AA:bb:0c:dd:ee:ff").unwrap();
        assert_eq!(mac.to_string(), "aa:bb:0c:dd:ee:ff");
    }

    #[test]
    fn mac_rejects_garbage() {
        let mut mac = MacAddr::default();
        assert!(mac.set("aa:bb").is_err());
        assert!(mac.set("aa:bb:cc:dd:ee:ff:00").is_err());
        assert!(mac.set("not-a-mac").is_err());
        assert_eq!(mac, MacAddr::default());
    }
}
