use crate::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use crate::core::ConfigProvider;
use crate::domain::model::{HeaderBlock, Variant};
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub header: Option<HeaderOverrides>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub variant: Variant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

/// 覆寫標頭的個別行；未指定的欄位沿用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderOverrides {
    pub checksum: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub time_updated: Option<String>,
    pub expires: Option<String>,
    pub homepage: Option<String>,
    pub license: Option<String>,
    #[serde(default)]
    pub stamp_now: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FILTERS_DIR})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    fn build_header(&self) -> HeaderBlock {
        let mut header = HeaderBlock::default();
        let Some(overrides) = &self.header else {
            return header;
        };

        let fields = [
            (&mut header.checksum, &overrides.checksum),
            (&mut header.title, &overrides.title),
            (&mut header.description, &overrides.description),
            (&mut header.version, &overrides.version),
            (&mut header.time_updated, &overrides.time_updated),
            (&mut header.expires, &overrides.expires),
            (&mut header.homepage, &overrides.homepage),
            (&mut header.license, &overrides.license),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }

        if overrides.stamp_now {
            header.stamped_now()
        } else {
            header
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn variant(&self) -> Variant {
        self.transform.variant
    }

    fn header(&self) -> HeaderBlock {
        self.build_header()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validate_path("source.path", &self.source.path)?;
        validate_path("load.output_path", &self.load.output_path)?;

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if !["compact", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(FilterError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        if self.transform.variant.writes_header() {
            self.build_header().validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "explicit-list"

[source]
path = "filters/explicit.txt"

[transform]
variant = "metadata"

[load]
output_path = "dist/explicit.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "explicit-list");
        assert_eq!(config.input_path(), "filters/explicit.txt");
        assert_eq!(config.output_path(), "dist/explicit.txt");
        assert_eq!(config.variant(), Variant::Metadata);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str("[pipeline]\nname = \"bare\"\n").unwrap();
        assert_eq!(config.input_path(), DEFAULT_INPUT_PATH);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.variant(), Variant::Plain);
        assert_eq!(config.header(), HeaderBlock::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FILTERLIST_TEST_SOURCE_DIR", "/srv/lists");

        let toml_content = r#"
[pipeline]
name = "env"

[source]
path = "${FILTERLIST_TEST_SOURCE_DIR}/explicit.txt"

[load]
output_path = "${FILTERLIST_TEST_UNSET_VAR}/out.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.path, "/srv/lists/explicit.txt");
        assert_eq!(config.load.output_path, "${FILTERLIST_TEST_UNSET_VAR}/out.txt");

        std::env::remove_var("FILTERLIST_TEST_SOURCE_DIR");
    }

    #[test]
    fn test_header_overrides_merge_with_defaults() {
        let toml_content = r#"
[pipeline]
name = "custom-header"

[transform]
variant = "metadata"

[header]
title = "! Title: Custom"
version = "! Version: 2.1.0"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let header = config.header();
        assert_eq!(header.title, "! Title: Custom");
        assert_eq!(header.version, "! Version: 2.1.0");
        assert_eq!(header.checksum, HeaderBlock::default().checksum);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_header_url_fails_validation() {
        let toml_content = r#"
[pipeline]
name = "bad-header"

[transform]
variant = "metadata"

[header]
license = "! License: ftp://example.org/LICENSE"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let toml_content = r#"
[pipeline]
name = "x"

[transform]
variant = "hosts"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(FilterError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_log_format_validation() {
        let toml_content = r#"
[pipeline]
name = "x"

[monitoring]
enabled = true
log_format = "json"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.monitoring_enabled());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());

        let bad = TomlConfig::from_toml_str(&toml_content.replace("json", "xml")).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pipeline]\nname = \"file-test\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
    }
}
