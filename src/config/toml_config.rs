use crate::core::markup::{default_rules, ClassRule};
use crate::core::ConfigProvider;
use crate::utils::error::{BlogError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

fn default_reference_name() -> String {
    "posts".to_string()
}

fn default_locale() -> String {
    "en-us".to_string()
}

fn default_take() -> u32 {
    10
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AgilityConfig {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_reference_name")]
    pub reference_name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub preview: bool,
    #[serde(default = "default_take")]
    pub take: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for AgilityConfig {
    fn default() -> Self {
        Self {
            guid: String::new(),
            api_key: String::new(),
            reference_name: default_reference_name(),
            locale: default_locale(),
            api_base_url: None,
            preview: false,
            take: default_take(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// Keeps the API key out of debug logs.
impl fmt::Debug for AgilityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgilityConfig")
            .field("guid", &self.guid)
            .field("api_key", &"<redacted>")
            .field("reference_name", &self.reference_name)
            .field("locale", &self.locale)
            .field("api_base_url", &self.api_base_url)
            .field("preview", &self.preview)
            .field("take", &self.take)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ConfigProvider for AgilityConfig {
    fn guid(&self) -> &str {
        &self.guid
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn reference_name(&self) -> &str {
        &self.reference_name
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    fn preview(&self) -> bool {
        self.preview
    }

    fn take(&self) -> u32 {
        self.take
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for AgilityConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_secret("agility.guid", unresolved_as_empty(&self.guid))?;
        validation::validate_secret("agility.api_key", unresolved_as_empty(&self.api_key))?;
        validation::validate_path_segment("agility.guid", &self.guid)?;
        validation::validate_path_segment("agility.reference_name", &self.reference_name)?;
        validation::validate_path_segment("agility.locale", &self.locale)?;
        if let Some(url) = &self.api_base_url {
            validation::validate_url("agility.api_base_url", url)?;
        }
        validation::validate_range("agility.take", self.take, 1, 250)?;
        validation::validate_range("agility.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

// A `${VAR}` left behind by substitution means the variable was not set.
fn unresolved_as_empty(value: &str) -> &str {
    if value.starts_with("${") && value.ends_with('}') {
        ""
    } else {
        value
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Agility CMS Blog".to_string(),
            heading: "Agility CMS Blog".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassRule>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub agility: AgilityConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
}

impl BlogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BlogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AGILITY_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BlogError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for BlogConfig {
    fn validate(&self) -> Result<()> {
        self.agility.validate()?;
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        for rule in &self.markup.rules {
            validation::validate_non_empty_string("markup.rules.tag", &rule.tag)?;
            validation::validate_non_empty_string("markup.rules.classes", &rule.classes)?;
        }
        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
