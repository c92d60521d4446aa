use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    pub api_base: Option<String>,
}

const CONFIG_FILE_PATH: &str = "config.toml";

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config {
            http_proxy: String::new(),
            https_proxy: String::new(),
            api_base: None,
        };

        //detect the config file exists
        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables if they exist
        if let Ok(http_proxy) = std::env::var("HTTP_PROXY") {
            config.http_proxy = http_proxy;
        }
        if let Ok(https_proxy) = std::env::var("HTTPS_PROXY") {
            config.https_proxy = https_proxy;
        }
        if let Ok(api_base) = std::env::var("FINBOARD_API_BASE") {
            config.api_base = Some(api_base);
        }
        config
    }

    /// A config pointed at an explicit API base, proxies untouched.
    /// Used by embedders and the integration tests.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Config {
            http_proxy: String::new(),
            https_proxy: String::new(),
            api_base: Some(api_base.into()),
        }
    }
}
