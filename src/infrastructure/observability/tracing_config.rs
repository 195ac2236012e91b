use crate::presentation::config::Environment;

/// Output shape of the global subscriber for one binary.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service: &'static str,
    pub environment: Environment,
    pub json_format: bool,
}

impl TracingConfig {
    /// JSON output follows the environment unless `LOG_FORMAT` says otherwise.
    pub fn new(service: &'static str, environment: Environment) -> Self {
        let json_format = match std::env::var("LOG_FORMAT") {
            Ok(format) => format.eq_ignore_ascii_case("json"),
            Err(_) => environment.prefers_json_logs(),
        };

        Self {
            service,
            environment,
            json_format,
        }
    }
}
