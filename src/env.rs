//! Environment variable access used during resolution.

use std::collections::BTreeMap;
use std::fmt;

/// Source of environment variables.
///
/// Resolution goes through this trait rather than touching the process
/// environment directly, so a pass is deterministic and tests never mutate
/// global state.
pub trait EnvSource: Send + Sync + fmt::Debug {
    /// Returns the value of the variable `name`, or `None` if it is unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source that reads from the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a map (for testing).
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: BTreeMap<String, String>,
}

impl MockEnv {
    /// Creates a new empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock environment from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Sets an environment variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_env_lookup() {
        let mut env = MockEnv::from_pairs([("TEST_LISTEN", ":3001")]);
        assert_eq!(env.get("TEST_LISTEN"), Some(":3001".to_owned()));
        assert_eq!(env.get("TEST_PORT"), None);

        env.set("TEST_PORT", "8080");
        assert_eq!(env.get("TEST_PORT"), Some("8080".to_owned()));
    }
}
