use crate::dotenv;
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default name of the local defaults file
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Named string values with environment-over-file precedence.
///
/// The process environment is snapshotted when the source is built, so
/// lookups are stable for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    env: HashMap<String, String>,
    defaults: HashMap<String, String>,
    has_defaults: bool,
    defaults_path: Option<PathBuf>,
}

impl ConfigSource {
    /// Load from the process environment and the defaults file at `path`.
    ///
    /// A missing defaults file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "defaults file not found, using environment only");
                None
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        let mut source = Self::from_parts(env, content.as_deref());
        if content.is_some() {
            debug!(path = %path.display(), keys = source.defaults.len(), "loaded defaults file");
            source.defaults_path = Some(path.to_path_buf());
        }
        Ok(source)
    }

    /// Build from explicit environment pairs and optional `.env` content.
    pub fn from_parts<I, K, V>(env: I, defaults: Option<&str>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: env.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            defaults: defaults
                .map(|content| dotenv::parse(content).into_iter().collect())
                .unwrap_or_default(),
            has_defaults: defaults.is_some(),
            defaults_path: None,
        }
    }

    /// Whether a defaults file was found and read
    pub fn has_defaults_file(&self) -> bool {
        self.has_defaults
    }

    /// Path of the defaults file that was read, if any
    pub fn defaults_path(&self) -> Option<&Path> {
        self.defaults_path.as_deref()
    }

    /// Look up a value. Empty values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        [&self.env, &self.defaults]
            .into_iter()
            .filter_map(|map| map.get(key))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    /// Look up a value, falling back to `default`.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Check that every key has a value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] listing all missing keys in the order given.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| self.get(key).is_none())
            .map(|key| (*key).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing { keys: missing })
        }
    }
}
