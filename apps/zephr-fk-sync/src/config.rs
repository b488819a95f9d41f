use std::path::PathBuf;

/// Default name of the report file, written to the working directory.
const DEFAULT_REPORT_PATH: &str = "foreign-key-creation-report.json";

/// Configuration for one sync run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base admin URL of the Zephr tenant.
    pub admin_url: String,

    /// Access key half of the credential pair.
    pub access_key: String,

    /// Secret key half of the credential pair.
    pub secret_key: String,

    /// Where the completion report is written.
    pub report_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|key| std::env::var(key))
    }

    /// Load configuration from a custom variable reader.
    ///
    /// This allows tests to supply variables without mutating
    /// process-global environment state.
    pub fn from_reader<F>(reader: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let admin_url = reader("ZEPHR_ADMIN_URL")
            .map_err(|_| ConfigError::MissingVar("ZEPHR_ADMIN_URL".into()))?;

        let access_key = reader("ZEPHR_ACCESS_KEY")
            .map_err(|_| ConfigError::MissingVar("ZEPHR_ACCESS_KEY".into()))?;

        let secret_key = reader("ZEPHR_SECRET_KEY")
            .map_err(|_| ConfigError::MissingVar("ZEPHR_SECRET_KEY".into()))?;

        let report_path = reader("ZEPHR_REPORT_PATH")
            .unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string())
            .into();

        Ok(Self {
            admin_url,
            access_key,
            secret_key,
            report_path,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
}
