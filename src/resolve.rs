//! The precedence merge that produces the final value map.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::ConfigError;
use crate::option::ConfigOption;
use crate::source::{CliReader, EnvReader, FileInput, FileReader, SourceReader, Sources};
use crate::tree::Category;

/// Which source supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Explicitly passed on the command line.
    CommandLine,
    /// Read from the environment.
    Environment,
    /// Resolved from the configuration file.
    File,
    /// Fell back to the option's registered default.
    Default,
    /// Registered without a default and missed by every source.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedValue {
    value: String,
    provenance: Provenance,
}

/// The final option-name → value map produced by one resolution pass.
///
/// Every registered option has exactly one entry. The map is immutable
/// after construction and safe for unsynchronized concurrent reads.
#[derive(Debug)]
pub struct Resolved {
    values: BTreeMap<String, ResolvedValue>,
    file_error: Option<ConfigError>,
}

impl Resolved {
    /// The resolved value for `name`.
    ///
    /// `None` for names that were never registered and for options that
    /// have no default and were missed by every source. An empty string is
    /// a real value, not a miss.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .filter(|entry| entry.provenance != Provenance::Missing)
            .map(|entry| entry.value.as_str())
    }

    /// Like [`get`](Self::get), but a miss is a typed error:
    /// [`ConfigError::UnknownOption`] for unregistered names and
    /// [`ConfigError::MissingOption`] for options no source supplied and
    /// no default covers.
    pub fn require(&self, name: &str) -> Result<&str, ConfigError> {
        match self.values.get(name) {
            None => Err(ConfigError::UnknownOption(name.to_owned())),
            Some(entry) if entry.provenance == Provenance::Missing => {
                Err(ConfigError::MissingOption(name.to_owned()))
            }
            Some(entry) => Ok(&entry.value),
        }
    }

    /// Which source supplied `name`, for any registered option.
    pub fn provenance(&self, name: &str) -> Option<Provenance> {
        self.values.get(name).map(|entry| entry.provenance)
    }

    /// Iterates resolved `(name, value)` pairs in name order, skipping
    /// options without a value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, entry)| entry.provenance != Provenance::Missing)
            .map(|(name, entry)| (name.as_str(), entry.value.as_str()))
    }

    /// Number of registered options covered by this map.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no options were registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The recoverable file failure recorded during the pass, if any.
    ///
    /// Set only when a file source was attached, failed to read or parse,
    /// and the registry was not configured with `require_file`.
    pub fn file_error(&self) -> Option<&ConfigError> {
        self.file_error.as_ref()
    }
}

pub(crate) fn resolve(config: &Config, sources: &Sources) -> Result<Resolved, ConfigError> {
    let mut file_error = None;
    let mut parsed = None;
    if let Some(FileInput::Adapter { adapter, path }) = &sources.file {
        match adapter.parse(path) {
            Ok(root) => parsed = Some(root),
            Err(err) if config.require_file => return Err(err),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "config file unavailable, continuing without it"
                );
                file_error = Some(err);
            }
        }
    }
    let tree: Option<&Category> = match &sources.file {
        Some(FileInput::Tree(root)) => Some(root),
        _ => parsed.as_ref(),
    };

    let cli = match &sources.cli {
        Some(values) if !config.disable_command_line => Some(CliReader::new(values)),
        _ => None,
    };
    let env = sources
        .env
        .as_deref()
        .map(|env| EnvReader::new(&config.env_prefix, env));
    let file = tree.map(FileReader::new);

    let mut values = BTreeMap::new();
    for option in config.options() {
        let hit = read(&cli, option, Provenance::CommandLine)
            .or_else(|| {
                if config.env_overrides_file {
                    read(&env, option, Provenance::Environment)
                        .or_else(|| read(&file, option, Provenance::File))
                } else {
                    read(&file, option, Provenance::File)
                        .or_else(|| read(&env, option, Provenance::Environment))
                }
            })
            .or_else(|| {
                option
                    .default_value()
                    .map(|value| (value.to_owned(), Provenance::Default))
            });
        let (value, provenance) = hit.unwrap_or((String::new(), Provenance::Missing));
        values.insert(option.name().to_owned(), ResolvedValue { value, provenance });
    }

    tracing::debug!(options = values.len(), "configuration resolved");
    Ok(Resolved { values, file_error })
}

fn read<R: SourceReader>(
    reader: &Option<R>,
    option: &ConfigOption,
    provenance: Provenance,
) -> Option<(String, Provenance)> {
    reader
        .as_ref()
        .and_then(|r| r.read(option))
        .map(|value| (value, provenance))
}
