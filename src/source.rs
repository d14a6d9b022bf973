//! Per-option source readers and the per-pass source bundle.

use std::path::{Path, PathBuf};

use crate::cli::CliValues;
use crate::env::EnvSource;
use crate::file::FileAdapter;
use crate::option::ConfigOption;
use crate::tree::Category;

/// One side of the precedence merge: resolve a single option against one
/// source's read-only context.
///
/// A reader that misses returns `None`; a miss is a normal outcome, never
/// an error. Reads are pure with respect to the context the reader was
/// built over.
pub trait SourceReader {
    /// Attempts to resolve `option` from this source.
    fn read(&self, option: &ConfigOption) -> Option<String>;
}

/// Reads previously parsed command-line values.
#[derive(Debug)]
pub struct CliReader<'a> {
    values: &'a CliValues,
}

impl<'a> CliReader<'a> {
    /// Creates a reader over a set of parsed command-line values.
    pub fn new(values: &'a CliValues) -> Self {
        Self { values }
    }
}

impl SourceReader for CliReader<'_> {
    /// Hits only for flags explicitly passed on the command line; a
    /// parser-supplied default is a miss, an explicitly passed empty string
    /// is a hit.
    fn read(&self, option: &ConfigOption) -> Option<String> {
        self.values.passed(option.name()).map(str::to_owned)
    }
}

/// Reads environment variables under a configured prefix.
#[derive(Debug)]
pub struct EnvReader<'a> {
    prefix: &'a str,
    env: &'a dyn EnvSource,
}

impl<'a> EnvReader<'a> {
    /// Creates a reader that looks up `prefix + option.env_var()`.
    pub fn new(prefix: &'a str, env: &'a dyn EnvSource) -> Self {
        Self { prefix, env }
    }
}

impl SourceReader for EnvReader<'_> {
    /// Misses when the option has no environment variable suffix. A
    /// variable that is set to the empty string counts as unset.
    fn read(&self, option: &ConfigOption) -> Option<String> {
        if option.env_var().is_empty() {
            return None;
        }
        let name = format!("{}{}", self.prefix, option.env_var());
        self.env.get(&name).filter(|value| !value.is_empty())
    }
}

/// Reads a parsed document tree via each option's dotted file key.
#[derive(Debug)]
pub struct FileReader<'a> {
    root: &'a Category,
}

impl<'a> FileReader<'a> {
    /// Creates a reader over a document tree root.
    pub fn new(root: &'a Category) -> Self {
        Self { root }
    }
}

impl SourceReader for FileReader<'_> {
    /// Misses when the option has no file key or the path does not resolve.
    fn read(&self, option: &ConfigOption) -> Option<String> {
        if option.file_key().is_empty() {
            return None;
        }
        self.root.find(option.file_key()).map(str::to_owned)
    }
}

/// Read-only context for one resolution pass.
///
/// Every source is optional; an absent source is a universal miss, never an
/// error. Sources are attached with the `with_*` methods:
///
/// ```no_run
/// use layerconf::{CliValues, JsonAdapter, Sources, StdEnv};
///
/// let sources = Sources::new()
///     .with_cli(CliValues::new())
///     .with_env(StdEnv)
///     .with_file(JsonAdapter, "app.json");
/// ```
#[derive(Debug, Default)]
pub struct Sources {
    pub(crate) cli: Option<CliValues>,
    pub(crate) env: Option<Box<dyn EnvSource>>,
    pub(crate) file: Option<FileInput>,
}

#[derive(Debug)]
pub(crate) enum FileInput {
    Adapter {
        adapter: Box<dyn FileAdapter>,
        path: PathBuf,
    },
    Tree(Category),
}

impl Sources {
    /// Creates an empty bundle; resolving against it yields defaults only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches parsed command-line values.
    pub fn with_cli(mut self, values: CliValues) -> Self {
        self.cli = Some(values);
        self
    }

    /// Attaches an environment source.
    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Some(Box::new(env));
        self
    }

    /// Attaches a configuration file, parsed once per resolution pass by
    /// `adapter`.
    pub fn with_file(
        mut self,
        adapter: impl FileAdapter + 'static,
        path: impl AsRef<Path>,
    ) -> Self {
        self.file = Some(FileInput::Adapter {
            adapter: Box::new(adapter),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Attaches an already-built document tree, bypassing file I/O.
    pub fn with_tree(mut self, root: Category) -> Self {
        self.file = Some(FileInput::Tree(root));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;

    fn listen_option() -> ConfigOption {
        ConfigOption::builder("listen")
            .env_var("LISTEN")
            .file_key("server.listen")
            .build()
    }

    #[test]
    fn test_cli_reader_only_hits_explicit_values() {
        let mut values = CliValues::new();
        values.insert("listen", ":9000");
        values.insert_default("workers", "4");

        let reader = CliReader::new(&values);
        assert_eq!(reader.read(&listen_option()), Some(":9000".to_owned()));
        assert_eq!(reader.read(&ConfigOption::builder("workers").build()), None);
    }

    #[test]
    fn test_env_reader_applies_prefix() {
        let env = MockEnv::from_pairs([("TEST_LISTEN", ":3001")]);
        let reader = EnvReader::new("TEST_", &env);
        assert_eq!(reader.read(&listen_option()), Some(":3001".to_owned()));

        let unprefixed = EnvReader::new("", &env);
        assert_eq!(unprefixed.read(&listen_option()), None);
    }

    #[test]
    fn test_env_reader_skips_opted_out_option() {
        let env = MockEnv::from_pairs([("LISTEN", ":3001")]);
        let reader = EnvReader::new("", &env);
        let no_env_var = ConfigOption::builder("listen").build();
        assert_eq!(reader.read(&no_env_var), None);
    }

    #[test]
    fn test_env_reader_treats_empty_value_as_unset() {
        let env = MockEnv::from_pairs([("LISTEN", "")]);
        let reader = EnvReader::new("", &env);
        assert_eq!(reader.read(&listen_option()), None);
    }

    #[test]
    fn test_file_reader_resolves_file_key() {
        let mut server = Category::new("server");
        server.insert_value("listen", ":3002");
        let mut root = Category::new("/");
        root.insert_category(server);

        let reader = FileReader::new(&root);
        assert_eq!(reader.read(&listen_option()), Some(":3002".to_owned()));
        assert_eq!(reader.read(&ConfigOption::builder("listen").build()), None);
    }
}
