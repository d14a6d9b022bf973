//! Parsed command-line values handed to the resolver.

use std::collections::BTreeMap;

#[cfg(feature = "clap")]
use crate::config::Config;

/// Command-line values collected by an argument parser, keyed by option
/// name.
///
/// The resolver never parses arguments itself; it consumes this value
/// object. Each entry tracks whether the flag was explicitly passed on the
/// command line independently of its content, so an explicitly passed empty
/// string is honored while a parser-supplied default is not mistaken for
/// user input.
#[derive(Debug, Clone, Default)]
pub struct CliValues {
    values: BTreeMap<String, CliValue>,
}

#[derive(Debug, Clone)]
struct CliValue {
    value: String,
    passed: bool,
}

impl CliValues {
    /// Creates an empty set of command-line values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a flag that was explicitly passed on the command line.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(
            name.into(),
            CliValue {
                value: value.into(),
                passed: true,
            },
        );
    }

    /// Records a value the parser produced without the flag being passed
    /// (a parser-side default). Such values never win precedence.
    pub fn insert_default(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(
            name.into(),
            CliValue {
                value: value.into(),
                passed: false,
            },
        );
    }

    /// The value for `name` if the flag was explicitly passed.
    pub fn passed(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .filter(|entry| entry.passed)
            .map(|entry| entry.value.as_str())
    }

    /// The value for `name` regardless of how the parser produced it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|entry| entry.value.as_str())
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no values were recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(feature = "clap")]
impl CliValues {
    /// Converts a `clap` parse result into command-line values for every
    /// option registered in `config`.
    ///
    /// Only values clap attributes to the command line itself are recorded
    /// as explicitly passed; defaults and other value sources are recorded
    /// with [`insert_default`](Self::insert_default).
    pub fn from_matches(config: &Config, matches: &clap::ArgMatches) -> Self {
        use clap::parser::ValueSource;

        let mut values = Self::new();
        for option in config.options() {
            let Ok(Some(value)) = matches.try_get_one::<String>(option.name()) else {
                continue;
            };
            match matches.value_source(option.name()) {
                Some(ValueSource::CommandLine) => values.insert(option.name(), value),
                _ => values.insert_default(option.name(), value),
            }
        }
        values
    }
}

#[cfg(feature = "clap")]
impl Config {
    /// Builds a `clap::Command` with one argument per registered option,
    /// wired from the option's flag spec, description, and default.
    ///
    /// The argument id is the option name, which is what
    /// [`CliValues::from_matches`] resolves against.
    pub fn to_command(&self, name: impl Into<clap::builder::Str>) -> clap::Command {
        let mut command = clap::Command::new(name);
        for option in self.options() {
            let mut arg = clap::Arg::new(option.name().to_owned())
                .long(option.long().to_owned())
                .value_name("VALUE");
            if let Some(short) = option.short() {
                arg = arg.short(short);
            }
            if !option.description().is_empty() {
                arg = arg.help(option.description().to_owned());
            }
            if let Some(default) = option.default_value() {
                arg = arg.default_value(default.to_owned());
            }
            command = command.arg(arg);
        }
        command
    }
}


#[cfg(all(test, feature = "clap"))]
mod clap_tests {
    use super::*;
    use crate::option::ConfigOption;

    fn listen_config() -> Config {
        let mut config = Config::new();
        config.register(
            ConfigOption::builder("listen")
                .short('l')
                .default_value(":3000")
                .description("address to listen on")
                .build(),
        );
        config.register(ConfigOption::builder("workers").build());
        config
    }

    #[test]
    fn test_passed_flag_is_explicit() {
        let config = listen_config();
        let matches = config
            .to_command("app")
            .try_get_matches_from(["app", "--listen", ":9001"])
            .unwrap();
        let values = CliValues::from_matches(&config, &matches);

        assert_eq!(values.passed("listen"), Some(":9001"));
        assert_eq!(values.passed("workers"), None);
    }

    #[test]
    fn test_clap_default_is_not_explicit() {
        let config = listen_config();
        let matches = config
            .to_command("app")
            .try_get_matches_from(["app"])
            .unwrap();
        let values = CliValues::from_matches(&config, &matches);

        assert_eq!(values.passed("listen"), None);
        assert_eq!(values.get("listen"), Some(":3000"));
    }

    #[test]
    fn test_short_flag() {
        let config = listen_config();
        let matches = config
            .to_command("app")
            .try_get_matches_from(["app", "-l", ":9002"])
            .unwrap();
        let values = CliValues::from_matches(&config, &matches);

        assert_eq!(values.passed("listen"), Some(":9002"));
    }
}
