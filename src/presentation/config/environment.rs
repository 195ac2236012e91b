use std::fmt;
use std::str::FromStr;

/// Deployment stage, selected by `APP_ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Test,
    Prod,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown APP_ENVIRONMENT '{0}', expected local, test or prod")]
pub struct UnknownEnvironment(pub String);

impl Environment {
    pub const VARIABLE: &'static str = "APP_ENVIRONMENT";

    /// Suffix of the optional `appsettings.<suffix>` file.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }

    /// Production logs are machine-read, everywhere else humans read them.
    pub fn prefers_json_logs(&self) -> bool {
        matches!(self, Environment::Prod)
    }

    pub fn from_env() -> Result<Self, UnknownEnvironment> {
        match std::env::var(Self::VARIABLE) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(UnknownEnvironment(value.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}
