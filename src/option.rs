//! Registered configuration options and their builder.

/// A single named configuration option.
///
/// The name is the stable identifier an option is registered and resolved
/// under. The remaining metadata describes how each source may supply a
/// value: the long/short command-line flag spec, the environment variable
/// suffix (empty means the option is not readable from the environment),
/// and the dotted file key (empty means not readable from a file).
///
/// Options are immutable once built; construct them through
/// [`ConfigOption::builder`].
///
/// ## Example
///
/// ```
/// use layerconf::ConfigOption;
///
/// let listen = ConfigOption::builder("listen")
///     .short('l')
///     .env_var("LISTEN")
///     .file_key("server.listen")
///     .default_value(":3000")
///     .description("address to listen on")
///     .build();
///
/// assert_eq!(listen.long(), "listen");
/// assert_eq!(listen.default_value(), Some(":3000"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    name: String,
    long: String,
    short: Option<char>,
    env_var: String,
    file_key: String,
    default: Option<String>,
    description: String,
}

impl ConfigOption {
    /// Starts building an option.
    ///
    /// The long flag defaults to the option name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn builder(name: impl Into<String>) -> OptionBuilder {
        let name = name.into();
        assert!(!name.is_empty(), "option name must not be empty");
        OptionBuilder {
            option: ConfigOption {
                long: name.clone(),
                name,
                short: None,
                env_var: String::new(),
                file_key: String::new(),
                default: None,
                description: String::new(),
            },
        }
    }

    /// The option's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long command-line flag.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The short command-line flag, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Environment variable suffix; empty when the option opted out of the
    /// environment source.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    /// Dotted file key; empty when the option opted out of the file source.
    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    /// The registered default, distinguishing "no default" from an empty
    /// default value.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Human-readable description, used as command-line help text.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for a [`ConfigOption`].
///
/// The builder is discarded by [`build`](OptionBuilder::build); only the
/// finished immutable option is stored in a registry.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct OptionBuilder {
    option: ConfigOption,
}

impl OptionBuilder {
    /// Overrides the long command-line flag (defaults to the option name).
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.option.long = long.into();
        self
    }

    /// Sets a short command-line flag.
    pub fn short(mut self, short: char) -> Self {
        self.option.short = Some(short);
        self
    }

    /// Sets the environment variable suffix looked up under the configured
    /// prefix.
    pub fn env_var(mut self, suffix: impl Into<String>) -> Self {
        self.option.env_var = suffix.into();
        self
    }

    /// Sets the dotted path the file source resolves for this option.
    ///
    /// # Panics
    ///
    /// Panics if any `.`-separated segment is empty. Leave the key unset to
    /// opt out of the file source instead.
    pub fn file_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        assert!(
            key.split('.').all(|segment| !segment.is_empty()),
            "file key segments must not be empty"
        );
        self.option.file_key = key;
        self
    }

    /// Sets the default value used when no source supplies one. An empty
    /// string is a valid default.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.option.default = Some(value.into());
        self
    }

    /// Sets the human-readable description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.option.description = text.into();
        self
    }

    /// Finishes the option.
    pub fn build(self) -> ConfigOption {
        self.option
    }
}
