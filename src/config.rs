use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// API token callers must present as a bearer credential
    pub api_token: String,

    /// Base URL of the model-serving endpoint for style classification
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,

    /// Optional API key forwarded to the model-serving endpoint
    #[serde(default)]
    pub classifier_api_key: Option<String>,

    /// Timeout for a single inference call, in seconds
    #[serde(default = "default_inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Simulated processing latency of the generative studio, in milliseconds
    #[serde(default = "default_studio_latency_ms")]
    pub studio_latency_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_classifier_url() -> String {
    "http://localhost:8501/v1/models/mobilenet-v2".to_string()
}

fn default_inference_timeout_secs() -> u64 {
    30
}

fn default_studio_latency_ms() -> u64 {
    1000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
