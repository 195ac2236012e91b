use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub http: HttpSettings,
    pub proxy: ProxySettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    pub port: u16,
    pub completion_endpoint: String,
    pub completion_key: String,
    pub cognitive_endpoint: String,
    pub cognitive_key: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    pub port: u16,
    pub mock_mode: bool,
    pub doc_intel_endpoint: Option<String>,
    pub doc_intel_key: Option<String>,
    pub openai_endpoint: Option<String>,
    pub openai_key: Option<String>,
    pub openai_deployment: String,
    pub openai_api_version: String,
    pub insight_max_tokens: usize,
    pub max_prompt_chars: usize,
    pub max_upload_mb: usize,
    pub session_idle_minutes: u64,
    pub max_sessions: usize,
    pub poll_interval_ms: u64,
    pub poll_timeout_secs: u64,
}

/// Original variable names read straight from the process environment.
const AZURE_OVERRIDES: [(&str, &str); 9] = [
    ("proxy.completion_endpoint", "AZURE_OPENAI_ENDPOINT"),
    ("proxy.completion_key", "AZURE_OPENAI_KEY"),
    ("proxy.cognitive_endpoint", "AZURE_COG_ENDPOINT"),
    ("proxy.cognitive_key", "AZURE_COG_KEY"),
    ("demo.doc_intel_endpoint", "AZURE_DOC_INTEL_ENDPOINT"),
    ("demo.doc_intel_key", "AZURE_DOC_INTEL_KEY"),
    ("demo.openai_endpoint", "AZURE_OPENAI_ENDPOINT"),
    ("demo.openai_key", "AZURE_OPENAI_KEY"),
    ("demo.openai_deployment", "AZURE_OPENAI_DEPLOYMENT"),
];

impl Settings {
    /// Layers defaults, `appsettings.<env>` files, `APP__*` variables and
    /// the `AZURE_*` variables, later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("http.timeout_secs", 30_i64)?
            .set_default("proxy.port", 8000_i64)?
            .set_default("proxy.completion_endpoint", "")?
            .set_default("proxy.completion_key", "")?
            .set_default("proxy.cognitive_endpoint", "")?
            .set_default("proxy.cognitive_key", "")?
            .set_default("proxy.max_tokens", 50_i64)?
            .set_default("demo.port", 8501_i64)?
            .set_default("demo.mock_mode", false)?
            .set_default("demo.openai_deployment", "gpt-4o-mini")?
            .set_default("demo.openai_api_version", "2024-06-01")?
            .set_default("demo.insight_max_tokens", 800_i64)?
            .set_default("demo.max_prompt_chars", 12_000_i64)?
            .set_default("demo.max_upload_mb", 20_i64)?
            .set_default("demo.session_idle_minutes", 30_i64)?
            .set_default("demo.max_sessions", 1_000_i64)?
            .set_default("demo.poll_interval_ms", 1_000_i64)?
            .set_default("demo.poll_timeout_secs", 120_i64)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            );

        for (key, variable) in AZURE_OVERRIDES {
            builder = builder.set_override_option(key, non_empty_var(variable))?;
        }
        builder = builder.set_override_option(
            "demo.mock_mode",
            non_empty_var("MOCK_MODE").map(|v| v.eq_ignore_ascii_case("true") || v == "1"),
        )?;

        builder.build()?.try_deserialize()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DemoSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes * 60)
    }
}
