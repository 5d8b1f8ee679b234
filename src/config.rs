use reqwest::Url;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Default Hugging Face inference router base URL.
pub const DEFAULT_HUGGINGFACE_URL: &str = "https://router.huggingface.co/hf-inference";
/// Default address of a self-hosted Text Embeddings Inference server.
pub const DEFAULT_TEI_URL: &str = "http://127.0.0.1:8080";
/// Pretrained RoBERTa detector used when no model is configured.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "openai-community/roberta-base-openai-detector";
/// Google Fact Check Tools claim search endpoint.
pub const DEFAULT_FACT_CHECK_URL: &str =
    "https://factchecktools.googleapis.com/v1alpha1/claims:search";
/// Log file used when `VAARTHA_LOG_FILE` is not set.
pub const DEFAULT_LOG_FILE: &str = "logs/vaartha.log";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the Vaartha server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend hosting the pretrained classification model.
    pub classifier_provider: ClassifierProvider,
    /// Base URL of the classifier backend.
    pub classifier_url: String,
    /// Model identifier passed to the classifier backend.
    pub classifier_model: String,
    /// Optional bearer token for the classifier backend.
    pub classifier_api_token: Option<String>,
    /// Whether the backend should truncate inputs longer than the model context.
    pub classifier_truncate: bool,
    /// Fact-check claim search endpoint.
    pub fact_check_url: String,
    /// API key for the fact-check service; lookups are disabled without one.
    pub fact_check_api_key: Option<String>,
    /// Optional BCP-47 language filter forwarded to the fact-check service.
    pub fact_check_language_code: Option<String>,
    /// Optional page size forwarded to the fact-check service.
    pub fact_check_page_size: Option<u32>,
    /// Timeout applied to every outbound HTTP request, in seconds.
    pub http_timeout_secs: u64,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// File receiving the plain-text copy of the logs.
    pub log_file: PathBuf,
}

/// Supported classifier backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// Hugging Face Inference API.
    HuggingFace,
    /// Self-hosted Text Embeddings Inference server.
    Tei,
}

impl ClassifierProvider {
    fn default_url(self) -> &'static str {
        match self {
            Self::HuggingFace => DEFAULT_HUGGINGFACE_URL,
            Self::Tei => DEFAULT_TEI_URL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);
        let classifier_provider = match vars.get("CLASSIFIER_PROVIDER") {
            Some(value) => value
                .parse()
                .map_err(|()| ConfigError::InvalidValue("CLASSIFIER_PROVIDER".to_string()))?,
            None => ClassifierProvider::HuggingFace,
        };
        let classifier_url = vars
            .get("CLASSIFIER_URL")
            .unwrap_or_else(|| classifier_provider.default_url().to_string());
        validate_url("CLASSIFIER_URL", &classifier_url)?;
        let fact_check_url = vars
            .get("FACT_CHECK_URL")
            .unwrap_or_else(|| DEFAULT_FACT_CHECK_URL.to_string());
        validate_url("FACT_CHECK_URL", &fact_check_url)?;

        Ok(Self {
            classifier_provider,
            classifier_url,
            classifier_model: vars
                .get("CLASSIFIER_MODEL")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string()),
            classifier_api_token: vars.get("CLASSIFIER_API_TOKEN"),
            classifier_truncate: vars.parsed::<bool>("CLASSIFIER_TRUNCATE")?.unwrap_or(true),
            fact_check_url,
            fact_check_api_key: vars.get("FACT_CHECK_API_KEY"),
            fact_check_language_code: vars.get("FACT_CHECK_LANGUAGE_CODE"),
            fact_check_page_size: vars.parsed("FACT_CHECK_PAGE_SIZE")?,
            http_timeout_secs: vars
                .parsed("HTTP_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            server_port: vars.parsed("SERVER_PORT")?,
            log_file: vars
                .get("VAARTHA_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }

    /// Timeout applied to outbound requests.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key.to_string()))
            })
            .transpose()
    }
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

impl std::str::FromStr for ClassifierProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "tei" => Ok(Self::Tei),
            _ => Err(()),
        }
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment (and `.env`) into the global cache.
///
/// Once a configuration is installed, later calls return it unchanged.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    Ok(CONFIG.get_or_init(|| config))
}
