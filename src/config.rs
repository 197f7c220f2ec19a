use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration for the forms and their backend client
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FormsConfig {
    /// Backend the edit and registration payloads are sent to
    #[serde(default)]
    pub backend: BackendConfig,
    /// Defaults applied when a recipe record leaves a field empty
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Configuration for the recipe backend
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Servings used when the record has none
    #[serde(default = "default_servings")]
    pub servings: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            servings: default_servings(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_servings() -> u32 {
    6
}

impl FormsConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FORMS__ prefix
    /// 2. recipe-forms.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FORMS__BACKEND__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<FormsConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-forms").required(false))
        // Use double underscore for nested: RECIPE_FORMS__BACKEND__TIMEOUT
        .add_source(
            Environment::with_prefix("RECIPE_FORMS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
