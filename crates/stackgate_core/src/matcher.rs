//! Parameter matching between a configuration and its template.
//!
//! A configuration must not supply parameters the template does not declare,
//! and must supply every declared parameter that has no `Default`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::TemplateSchema;

/// Outcome of matching configuration parameters against a template schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 on success, 1 on mismatch
    pub exit_code: i32,
    /// Newline-joined diagnostics, empty on success
    pub message: String,
    /// Supplied by the configuration but not declared by the template
    pub unknown: BTreeSet<String>,
    /// Declared without a default but not supplied
    pub missing: BTreeSet<String>,
}

impl MatchResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Compare configuration parameter names against the template schema.
///
/// Unknown and missing parameters are both reported in one result.
pub fn match_params(config_params: &BTreeSet<String>, template: &TemplateSchema) -> MatchResult {
    let unknown: BTreeSet<String> = config_params
        .iter()
        .filter(|name| !template.contains(name))
        .cloned()
        .collect();

    let missing: BTreeSet<String> = template
        .names()
        .filter(|name| !config_params.contains(*name))
        .filter(|name| !template.has_default(name))
        .map(str::to_string)
        .collect();

    if unknown.is_empty() && missing.is_empty() {
        return MatchResult::default();
    }

    let mut errors = Vec::new();
    if !unknown.is_empty() {
        errors.push(format!("Unknown params in config: {}", format_set(&unknown)));
    }
    if !missing.is_empty() {
        errors.push(format!("Missing template params: {}", format_set(&missing)));
    }

    MatchResult {
        exit_code: 1,
        message: errors.join("\n"),
        unknown,
        missing,
    }
}

fn format_set(names: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = names.iter().map(String::as_str).collect();
    format!("{{{}}}", joined.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn required() -> Value {
        serde_yaml::from_str("Type: String").unwrap()
    }

    fn defaulted(default: &str) -> Value {
        serde_yaml::from_str(&format!("Type: String\nDefault: {}", default)).unwrap()
    }

    #[test]
    fn test_defaulted_parameter_may_be_omitted() {
        let template = TemplateSchema::new()
            .with_parameter("Env", required())
            .with_parameter("Size", defaulted("small"));

        let result = match_params(&names(&["Env"]), &template);
        assert_eq!(result, MatchResult::default());
        assert!(result.success());
        assert_eq!(result.message, "");
    }

    #[test]
    fn test_unknown_parameter() {
        let template = TemplateSchema::new().with_parameter("Env", required());

        let result = match_params(&names(&["Env", "Extra"]), &template);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.message, "Unknown params in config: {Extra}");
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_missing_required_parameter() {
        let template = TemplateSchema::new().with_parameter("Env", required());

        let result = match_params(&names(&[]), &template);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.message, "Missing template params: {Env}");
        assert!(result.unknown.is_empty());
    }

    #[test]
    fn test_both_categories_reported_together() {
        let template = TemplateSchema::new()
            .with_parameter("Env", required())
            .with_parameter("Vpc", required())
            .with_parameter("Size", defaulted("small"));

        let result = match_params(&names(&["Extra", "Zone"]), &template);
        assert_eq!(result.exit_code, 1);
        assert_eq!(
            result.message,
            "Unknown params in config: {Extra, Zone}\nMissing template params: {Env, Vpc}"
        );
        assert_eq!(result.unknown, names(&["Extra", "Zone"]));
        assert_eq!(result.missing, names(&["Env", "Vpc"]));
    }

    #[test]
    fn test_non_mapping_definition_is_required() {
        let template = TemplateSchema::new().with_parameter("Env", Value::Null);
        let result = match_params(&names(&[]), &template);
        assert_eq!(result.missing, names(&["Env"]));
    }

    #[test]
    fn test_swapping_extra_side_changes_category_only() {
        let template = TemplateSchema::new().with_parameter("A", required());

        let extra_in_config = match_params(&names(&["A", "B"]), &template);
        let template_with_b = template.clone().with_parameter("B", required());
        let extra_in_template = match_params(&names(&["A"]), &template_with_b);

        assert_eq!(extra_in_config.exit_code, extra_in_template.exit_code);
        assert_eq!(extra_in_config.unknown, names(&["B"]));
        assert_eq!(extra_in_template.missing, names(&["B"]));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let template = TemplateSchema::new()
            .with_parameter("Env", required())
            .with_parameter("Size", defaulted("small"));
        let config = names(&["Size", "Other"]);

        assert_eq!(match_params(&config, &template), match_params(&config, &template));
    }

    #[test]
    fn test_pass_iff_subset_and_rest_defaulted() {
        let template = TemplateSchema::new()
            .with_parameter("A", required())
            .with_parameter("B", defaulted("1"))
            .with_parameter("C", defaulted("2"));

        let cases: &[(&[&str], bool)] = &[
            (&["A"], true),
            (&["A", "B"], true),
            (&["A", "B", "C"], true),
            (&["B", "C"], false),
            (&["A", "D"], false),
            (&[], false),
        ];

        for (config, expected) in cases {
            let result = match_params(&names(config), &template);
            assert_eq!(result.success(), *expected, "config {:?}", config);
        }
    }
}
