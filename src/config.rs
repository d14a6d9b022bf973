//! Option registry and resolution settings.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::option::ConfigOption;
use crate::resolve::{self, Resolved};
use crate::source::Sources;

/// The set of registered options plus the knobs that control how they are
/// resolved.
///
/// Settings are applied with consuming chain setters; options are
/// registered with [`register`](Config::register). A pass over a
/// [`Sources`] bundle produces a [`Resolved`] map:
///
/// ```
/// use layerconf::{Config, ConfigOption, MockEnv, Sources};
///
/// let mut config = Config::new().env_prefix("MYAPP_");
/// config.register(
///     ConfigOption::builder("listen")
///         .env_var("LISTEN")
///         .default_value(":3000")
///         .build(),
/// );
///
/// let sources = Sources::new()
///     .with_env(MockEnv::from_pairs([("MYAPP_LISTEN", ":3001")]));
/// let resolved = config.resolve(&sources)?;
/// assert_eq!(resolved.get("listen"), Some(":3001"));
/// # Ok::<(), layerconf::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) env_prefix: String,
    pub(crate) disable_command_line: bool,
    pub(crate) env_overrides_file: bool,
    pub(crate) require_file: bool,
    options: BTreeMap<String, ConfigOption>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates an empty registry.
    ///
    /// Defaults: no environment prefix, command line enabled, environment
    /// overriding the file source, file errors recoverable.
    pub fn new() -> Self {
        Self {
            env_prefix: String::new(),
            disable_command_line: false,
            env_overrides_file: true,
            require_file: false,
            options: BTreeMap::new(),
        }
    }

    /// Sets the prefix prepended to every option's environment variable
    /// suffix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skips the command-line source entirely when `true`.
    pub fn disable_command_line(mut self, disabled: bool) -> Self {
        self.disable_command_line = disabled;
        self
    }

    /// Chooses the environment-vs-file precedence: `true` (the default)
    /// consults the environment first, `false` the file. The command line,
    /// when enabled, wins over both unconditionally.
    pub fn env_overrides_file(mut self, env_wins: bool) -> Self {
        self.env_overrides_file = env_wins;
        self
    }

    /// Makes an unreadable or unparsable config file abort resolution
    /// instead of being recorded as a recoverable error.
    pub fn require_file(mut self, required: bool) -> Self {
        self.require_file = required;
        self
    }

    /// Registers an option under its name.
    ///
    /// Registering the same name twice replaces the previous option; no
    /// error is raised.
    pub fn register(&mut self, option: ConfigOption) {
        self.options.insert(option.name().to_owned(), option);
    }

    /// Looks up a registered option by name.
    pub fn get(&self, name: &str) -> Option<&ConfigOption> {
        self.options.get(name)
    }

    /// Iterates registered options in name order.
    pub fn options(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.values()
    }

    /// Resolves every registered option against `sources`, applying the
    /// precedence order: command line, then environment/file in the
    /// configured order, then the registered default.
    ///
    /// # Errors
    ///
    /// Fails only when a file source fails to read or parse while
    /// [`require_file`](Config::require_file) is set; with the default
    /// recoverable policy the failure is reported through
    /// [`Resolved::file_error`] and resolution proceeds without the file.
    pub fn resolve(&self, sources: &Sources) -> Result<Resolved, ConfigError> {
        resolve::resolve(self, sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_last_write_wins() {
        let mut config = Config::new();
        config.register(ConfigOption::builder("listen").default_value(":3000").build());
        config.register(ConfigOption::builder("listen").default_value(":4000").build());

        let opt = config.get("listen").unwrap();
        assert_eq!(opt.default_value(), Some(":4000"));
        assert_eq!(config.options().count(), 1);
    }

    #[test]
    fn test_get_unregistered_option() {
        let config = Config::new();
        assert!(config.get("listen").is_none());
    }

    #[test]
    fn test_settings_chain() {
        let config = Config::new()
            .env_prefix("APP_")
            .disable_command_line(true)
            .env_overrides_file(false)
            .require_file(true);
        assert_eq!(config.env_prefix, "APP_");
        assert!(config.disable_command_line);
        assert!(!config.env_overrides_file);
        assert!(config.require_file);
    }
}
