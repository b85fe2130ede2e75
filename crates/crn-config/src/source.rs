use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// A single source of string-keyed configuration values.
///
/// Sources are consulted in the order they were handed to
/// [`LayeredConfig`](crate::LayeredConfig). Once constructed, a source only
/// answers lookups; it never fails and never changes.
pub trait ConfigSource: Send + Sync {
    /// The value this source defines for `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Diagnostic name, used to trace a resolved value back to its source.
    fn name(&self) -> &str;
}

/// In-memory source backed by a map.
///
/// Used for programmatic overrides (CLI flags, test fixtures) and for the
/// library-default values registered behind all consumer sources.
#[derive(Clone, Debug, Default)]
pub struct MapSource {
    name: String,
    entries: HashMap<String, String>,
}

impl MapSource {
    /// Create an empty source with the given diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Add one key-value pair, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of entries this source defines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this source defines no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Environment-variable source.
///
/// A key is mapped to a variable name by upper-casing it, replacing `.` and
/// `-` with `_`, and prepending the prefix: with prefix `CRN`,
/// `repository.endpoint` reads `CRN_REPOSITORY_ENDPOINT`. Lookups go to the
/// live process environment.
#[derive(Clone, Debug)]
pub struct EnvSource {
    prefix: String,
    name: String,
}

impl EnvSource {
    /// Create a source reading variables under `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let name = format!("env:{prefix}");
        Self { prefix, name }
    }

    /// The environment variable consulted for `key`.
    pub fn var_name(&self, key: &str) -> String {
        let mapped: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        format!("{}_{}", self.prefix, mapped)
    }
}

impl ConfigSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Flat dotted-key view over a TOML document.
///
/// Tables flatten into dotted keys (`[repository]` / `endpoint = "…"`
/// becomes `repository.endpoint`); scalar values are stringified. Arrays do
/// not participate, since the client's settings are flat strings.
#[derive(Clone, Debug)]
pub struct TomlSource {
    name: String,
    entries: HashMap<String, String>,
}

impl TomlSource {
    /// Load and flatten a TOML file.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path.display().to_string(), &text)
    }

    /// Flatten an already-loaded TOML document.
    pub fn from_toml_str(name: impl Into<String>, text: &str) -> ConfigResult<Self> {
        let name = name.into();
        let value: toml::Value = text.parse().map_err(|source| ConfigError::Parse {
            name: name.clone(),
            source,
        })?;
        let mut entries = HashMap::new();
        flatten("", &value, &mut entries);
        debug!(source = %name, keys = entries.len(), "loaded configuration source");
        Ok(Self { name, entries })
    }

    /// Number of flattened keys this source defines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this source defines no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for TomlSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&full, nested, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(i) => {
            out.insert(prefix.to_string(), i.to_string());
        }
        toml::Value::Float(f) => {
            out.insert(prefix.to_string(), f.to_string());
        }
        toml::Value::Boolean(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        toml::Value::Datetime(dt) => {
            out.insert(prefix.to_string(), dt.to_string());
        }
        toml::Value::Array(_) => {}
    }
}
