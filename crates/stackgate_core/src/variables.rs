//! Variable mapping used for configuration substitution.

use std::path::Path;

use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value;
use tracing::{debug, info};

use crate::content::ContentLoader;
use crate::error::{CoreError, CoreResult};

/// Read-only variable mapping, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: Map<String, JsonValue>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed document. An empty document yields no variables.
    pub fn from_value(value: Value) -> CoreResult<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(_) => match serde_json::to_value(&value) {
                Ok(JsonValue::Object(values)) => Ok(Self { values }),
                Ok(_) => Err(CoreError::InvalidVariables(
                    "expected a mapping of variable names to values".to_string(),
                )),
                Err(e) => Err(CoreError::InvalidVariables(e.to_string())),
            },
            _ => Err(CoreError::InvalidVariables(
                "expected a mapping of variable names to values".to_string(),
            )),
        }
    }

    /// Load variables from a path or URL.
    pub async fn load(loader: &ContentLoader, source: &str) -> CoreResult<Self> {
        info!("Loading variables from {}", source);
        let value = loader.load(source).await?;
        let variables = Self::from_value(value)?;
        debug!("Loaded {} variables", variables.len());
        Ok(variables)
    }

    /// Load `default_file` if it exists, otherwise return no variables.
    pub async fn load_optional(loader: &ContentLoader, default_file: &Path) -> CoreResult<Self> {
        if default_file.is_file() {
            Self::load(loader, &default_file.to_string_lossy()).await
        } else {
            debug!("No variables file at {:?}", default_file);
            Ok(Self::new())
        }
    }

    pub fn insert(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rendering context: variables are addressed as `var.NAME`.
    pub fn context(&self) -> JsonValue {
        let mut context = Map::new();
        context.insert("var".to_string(), JsonValue::Object(self.values.clone()));
        JsonValue::Object(context)
    }
}
