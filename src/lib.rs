//! Layered configuration resolution.
//!
//! Options are registered once with metadata describing how each source may
//! supply a value, then resolved in a single pass over three independent
//! sources: command-line flags, environment variables, and a structured
//! configuration file parsed into a dotted-path-addressable document tree.
//!
//! Precedence per option: an explicitly passed command-line flag always
//! wins; environment and file are consulted next in the configured order;
//! the registered default is the fallback. Options resolve independently
//! of each other, and a pass is deterministic and idempotent.
//!
//! ## Example
//!
//! ```no_run
//! use layerconf::{CliValues, Config, ConfigOption, JsonAdapter, Sources, StdEnv};
//!
//! let mut config = Config::new().env_prefix("MYAPP_");
//! config.register(
//!     ConfigOption::builder("listen")
//!         .env_var("LISTEN")
//!         .file_key("server.listen")
//!         .default_value(":3000")
//!         .description("address to listen on")
//!         .build(),
//! );
//!
//! let matches = config.to_command("myapp").get_matches();
//! let resolved = config.resolve(
//!     &Sources::new()
//!         .with_cli(CliValues::from_matches(&config, &matches))
//!         .with_env(StdEnv)
//!         .with_file(JsonAdapter, "myapp.json"),
//! )?;
//!
//! println!("listening on {}", resolved.require("listen")?);
//! # Ok::<(), layerconf::ConfigError>(())
//! ```

mod cli;
mod config;
mod env;
mod error;
mod file;
mod option;
mod resolve;
mod source;
mod tree;

pub use cli::CliValues;
pub use config::Config;
pub use env::{EnvSource, MockEnv, StdEnv};
pub use error::ConfigError;
#[cfg(feature = "json")]
pub use file::JsonAdapter;
#[cfg(feature = "toml")]
pub use file::TomlAdapter;
pub use file::{FileAdapter, LIST_PLACEHOLDER};
pub use option::{ConfigOption, OptionBuilder};
pub use resolve::{Provenance, Resolved};
pub use source::{CliReader, EnvReader, FileReader, SourceReader, Sources};
pub use tree::Category;
