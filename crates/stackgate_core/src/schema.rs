//! Template parameter schema extraction.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::yaml::key_name;

/// Key holding a parameter's default value.
pub const DEFAULT_KEY: &str = "Default";

/// The `Parameters` section of an infrastructure template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSchema {
    parameters: BTreeMap<String, Value>,
}

impl TemplateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter definition.
    pub fn with_parameter(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.parameters.insert(name.into(), definition);
        self
    }

    /// Read the schema from a template file.
    ///
    /// Templates are parsed as YAML whatever their extension; JSON templates
    /// parse the same way and intrinsic tags are accepted.
    pub fn load(path: &Path) -> CoreResult<Self> {
        debug!("Reading template parameters from {:?}", path);
        let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let mut document: Value =
            serde_yaml::from_str(&raw).map_err(|e| CoreError::parse(path.to_string_lossy(), e))?;
        document
            .apply_merge()
            .map_err(|e| CoreError::parse(path.to_string_lossy(), e))?;
        Self::from_document(&document, path)
    }

    /// Extract the schema from a parsed template.
    ///
    /// A template without a `Parameters` section has no parameters.
    pub fn from_document(document: &Value, path: &Path) -> CoreResult<Self> {
        let section = match document {
            Value::Mapping(root) => root.get("Parameters"),
            Value::Null => None,
            _ => {
                return Err(CoreError::Schema {
                    path: path.to_path_buf(),
                    message: "template is not a mapping".to_string(),
                })
            }
        };

        match section {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Mapping(parameters)) => Ok(Self {
                parameters: parameters
                    .iter()
                    .map(|(name, definition)| (key_name(name), definition.clone()))
                    .collect(),
            }),
            Some(_) => Err(CoreError::Schema {
                path: path.to_path_buf(),
                message: "Parameters is not a mapping".to_string(),
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Whether `name` declares a default value. Unknown names have none.
    pub fn has_default(&self, name: &str) -> bool {
        match self.parameters.get(name) {
            Some(Value::Mapping(definition)) => definition.contains_key(DEFAULT_KEY),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_from_yaml_document() {
        let doc = parse(
            "Parameters:\n  Env:\n    Type: String\n  Size:\n    Type: String\n    Default: small\nResources:\n  Bucket:\n    Type: AWS::S3::Bucket\n    Properties:\n      BucketName: !Ref Env\n",
        );
        let schema = TemplateSchema::from_document(&doc, Path::new("app.yaml")).unwrap();

        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["Env", "Size"]);
        assert!(!schema.has_default("Env"));
        assert!(schema.has_default("Size"));
        assert!(!schema.has_default("Unknown"));
    }

    #[test]
    fn test_null_default_still_counts() {
        let doc = parse("Parameters:\n  Tag:\n    Default: ''\n  Other:\n    Default:\n");
        let schema = TemplateSchema::from_document(&doc, Path::new("t.yaml")).unwrap();
        assert!(schema.has_default("Tag"));
        assert!(schema.has_default("Other"));
    }

    #[test]
    fn test_missing_parameters_section() {
        let doc = parse("Resources: {}\n");
        let schema = TemplateSchema::from_document(&doc, Path::new("t.yaml")).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_parameters_not_a_mapping() {
        let doc = parse("Parameters: [Env]\n");
        let err = TemplateSchema::from_document(&doc, Path::new("t.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::Schema { .. }));
    }

    #[test]
    fn test_load_json_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(
            &path,
            r#"{"Parameters": {"Env": {"Type": "String"}, "Size": {"Type": "String", "Default": "small"}}}"#,
        )
        .unwrap();

        let schema = TemplateSchema::load(&path).unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.has_default("Size"));
    }

    #[test]
    fn test_load_resolves_merge_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.yaml");
        fs::write(
            &path,
            "Common: &common\n  Env:\n    Type: String\nParameters:\n  <<: *common\n  Size:\n    Type: String\n    Default: small\n",
        )
        .unwrap();

        let schema = TemplateSchema::load(&path).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["Env", "Size"]);
        assert!(!schema.has_default("Env"));
    }

    #[test]
    fn test_load_missing_template() {
        let dir = tempdir().unwrap();
        let err = TemplateSchema::load(&dir.path().join("none.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }
}
