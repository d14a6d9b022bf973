//! File adapters that parse configuration files into document trees.

use std::fmt;
use std::path::Path;

use crate::error::ConfigError;
use crate::tree::Category;

/// Placeholder stored for list values in parsed documents.
///
/// List semantics are out of scope for the document tree, so adapters
/// record arrays as this opaque sentinel rather than dropping the key.
pub const LIST_PLACEHOLDER: &str = "{{list}}";

/// Converts a file on disk into a [`Category`] tree.
///
/// One implementation exists per file format; the resolver depends only on
/// this contract. Parsing is a single scoped read: open, parse fully,
/// return the tree.
pub trait FileAdapter: Send + Sync + fmt::Debug {
    /// Parses the file at `path` into a document tree rooted at `"/"`.
    fn parse(&self, path: &Path) -> Result<Category, ConfigError>;
}

#[cfg(any(feature = "json", feature = "toml"))]
fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Adapter for JSON configuration files.
///
/// Objects become categories, strings/numbers/booleans become values
/// (numbers as their shortest round-tripping decimal form, booleans as
/// literal `true`/`false`), arrays become [`LIST_PLACEHOLDER`], and nulls
/// are omitted entirely.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

#[cfg(feature = "json")]
impl FileAdapter for JsonAdapter {
    fn parse(&self, path: &Path) -> Result<Category, ConfigError> {
        let contents = read_file(path)?;
        let document: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| ConfigError::FileParse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        match document {
            serde_json::Value::Object(map) => Ok(json_category("/", &map)),
            _ => Err(ConfigError::FileParse {
                path: path.to_path_buf(),
                source: "top level of a config file must be an object".into(),
            }),
        }
    }
}

#[cfg(feature = "json")]
fn json_category(name: &str, object: &serde_json::Map<String, serde_json::Value>) -> Category {
    use serde_json::Value;

    let mut node = Category::new(name);
    for (key, value) in object {
        match value {
            Value::String(s) => node.insert_value(key, s),
            Value::Number(n) => node.insert_value(key, n.to_string()),
            Value::Bool(b) => node.insert_value(key, if *b { "true" } else { "false" }),
            Value::Array(_) => node.insert_value(key, LIST_PLACEHOLDER),
            Value::Object(inner) => node.insert_category(json_category(key, inner)),
            // Per the JSON spec this can only be null.
            Value::Null => {}
        }
    }
    node
}

/// Adapter for TOML configuration files.
///
/// Tables become categories, scalars (including datetimes) become values
/// in their display form, and arrays become [`LIST_PLACEHOLDER`].
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlAdapter;

#[cfg(feature = "toml")]
impl FileAdapter for TomlAdapter {
    fn parse(&self, path: &Path) -> Result<Category, ConfigError> {
        let contents = read_file(path)?;
        let table: toml::Table =
            toml::from_str(&contents).map_err(|e| ConfigError::FileParse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        Ok(toml_category("/", &table))
    }
}

#[cfg(feature = "toml")]
fn toml_category(name: &str, table: &toml::Table) -> Category {
    use toml::Value;

    let mut node = Category::new(name);
    for (key, value) in table {
        match value {
            Value::String(s) => node.insert_value(key, s),
            Value::Integer(i) => node.insert_value(key, i.to_string()),
            Value::Float(f) => node.insert_value(key, f.to_string()),
            Value::Boolean(b) => node.insert_value(key, if *b { "true" } else { "false" }),
            Value::Datetime(dt) => node.insert_value(key, dt.to_string()),
            Value::Array(_) => node.insert_value(key, LIST_PLACEHOLDER),
            Value::Table(inner) => node.insert_category(toml_category(key, inner)),
        }
    }
    node
}

#[cfg(test)]
mod tests {
    #[cfg(any(feature = "json", feature = "toml"))]
    use super::*;
    #[cfg(any(feature = "json", feature = "toml"))]
    use std::io::Write;
    #[cfg(any(feature = "json", feature = "toml"))]
    use tempfile::NamedTempFile;

    #[cfg(feature = "json")]
    #[test]
    fn test_json_adapter_builds_tree() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "listen": ":3000",
                "workers": 4,
                "ratio": 0.25,
                "debug": true,
                "tags": ["a", "b"],
                "legacy": null,
                "server": {{ "host": "localhost", "port": 8080 }}
            }}"#
        )
        .unwrap();

        let root = JsonAdapter.parse(file.path()).unwrap();
        assert_eq!(root.name(), "/");
        assert_eq!(root.find("listen"), Some(":3000"));
        assert_eq!(root.find("workers"), Some("4"));
        assert_eq!(root.find("ratio"), Some("0.25"));
        assert_eq!(root.find("debug"), Some("true"));
        assert_eq!(root.find("tags"), Some(LIST_PLACEHOLDER));
        assert_eq!(root.find("legacy"), None);
        assert_eq!(root.find("server.host"), Some("localhost"));
        assert_eq!(root.find("server.port"), Some("8080"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_adapter_missing_file() {
        let result = JsonAdapter.parse(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_adapter_malformed_content() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = JsonAdapter.parse(file.path());
        assert!(matches!(result, Err(ConfigError::FileParse { .. })));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_adapter_rejects_non_object_root() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        let result = JsonAdapter.parse(file.path());
        assert!(matches!(result, Err(ConfigError::FileParse { .. })));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_adapter_builds_tree() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "listen = \":3000\"\n\
             workers = 4\n\
             debug = false\n\
             tags = [\"a\"]\n\n\
             [server]\n\
             host = \"localhost\"\n"
        )
        .unwrap();

        let root = TomlAdapter.parse(file.path()).unwrap();
        assert_eq!(root.find("listen"), Some(":3000"));
        assert_eq!(root.find("workers"), Some("4"));
        assert_eq!(root.find("debug"), Some("false"));
        assert_eq!(root.find("tags"), Some(LIST_PLACEHOLDER));
        assert_eq!(root.find("server.host"), Some("localhost"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_adapter_malformed_content() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "listen = ").unwrap();
        let result = TomlAdapter.parse(file.path());
        assert!(matches!(result, Err(ConfigError::FileParse { .. })));
    }
}
