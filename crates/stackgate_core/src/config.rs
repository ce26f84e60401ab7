//! Configuration file loading.
//!
//! A configuration file is rendered with the run's variables first and only
//! then parsed as YAML, so variables may appear anywhere in the raw text.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::substitute::Substitutor;
use crate::variables::Variables;
use crate::yaml::{key_name, normalize_tags};

/// A deployment configuration after substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Template location, relative to the project root
    pub template_path: String,
    /// Parameter values keyed by parameter name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Mapping,
    /// Any other settings, kept as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Mapping, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default())
}

impl Configuration {
    /// Names of the parameters this configuration supplies.
    pub fn parameter_names(&self) -> BTreeSet<String> {
        self.parameters.keys().map(key_name).collect()
    }
}

/// Loads configuration files with variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
    substitutor: Substitutor,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read, render and parse the configuration at `path`.
    pub fn load(&self, path: &Path, variables: &Variables) -> CoreResult<Configuration> {
        self.load_inner(path, variables).map_err(CoreError::config_load)
    }

    fn load_inner(&self, path: &Path, variables: &Variables) -> CoreResult<Configuration> {
        debug!("Loading config from {:?}", path);
        let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let rendered = self.substitutor.render(&raw, variables)?;
        parse_configuration(&rendered, &path.to_string_lossy())
    }
}

/// Parse rendered configuration text.
pub fn parse_configuration(text: &str, origin: &str) -> CoreResult<Configuration> {
    let mut value: Value = serde_yaml::from_str(text).map_err(|e| CoreError::parse(origin, e))?;
    value.apply_merge().map_err(|e| CoreError::parse(origin, e))?;

    match normalize_tags(value) {
        value @ Value::Mapping(_) => serde_yaml::from_value(value)
            .map_err(|e| CoreError::InvalidConfig(format!("{}: {}", origin, e))),
        Value::Null => Err(CoreError::InvalidConfig(format!("{}: document is empty", origin))),
        _ => Err(CoreError::InvalidConfig(format!(
            "{}: expected a mapping at the top level",
            origin
        ))),
    }
}
