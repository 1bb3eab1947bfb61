use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct BindingConfig {
    pub validation_enabled: bool,
    pub max_issues: usize,
    pub completion_enabled: bool,
    pub max_reference_depth: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            validation_enabled: true,
            max_issues: 200,
            completion_enabled: true,
            max_reference_depth: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BindingConfigSection {
    #[serde(default)]
    validation: ValidationConfig,
    #[serde(default)]
    completion: CompletionConfig,
    #[serde(default)]
    schema: SchemaConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ValidationConfig {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    max_issues: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompletionConfig {
    #[serde(default)]
    enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SchemaConfig {
    #[serde(default)]
    max_reference_depth: Option<usize>,
}

impl BindingConfig {
    /// Merge a camelCase JSON section over the defaults. Zero limits are ignored.
    pub fn from_value(value: serde_json::Value) -> anyhow::Result<Self> {
        let section: BindingConfigSection = serde_json::from_value(value)?;
        let mut cfg = BindingConfig::default();
        cfg.validation_enabled = section.validation.enabled.unwrap_or(true);
        cfg.completion_enabled = section.completion.enabled.unwrap_or(true);
        if let Some(v) = section.validation.max_issues.filter(|v| *v > 0) {
            cfg.max_issues = v;
        }
        if let Some(v) = section.schema.max_reference_depth.filter(|v| *v > 0) {
            cfg.max_reference_depth = v;
        }
        Ok(cfg)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }
}
