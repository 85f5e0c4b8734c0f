use std::error::Error;
use std::fmt;

pub const REGION_ENV: &str = "KB_AWS_REGION";
pub const BUCKET_LOCATION_ENV: &str = "KB_BUCKET_LOCATION";
pub const LOG_FORMAT_ENV: &str = "KB_LOG_FORMAT";

/// Used for bucket creation only when neither the override nor the SDK
/// supplies a region.
pub const DEFAULT_BUCKET_LOCATION: &str = "us-west-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Process-level settings. Cloud credentials are not part of this; they come
/// from the ambient AWS configuration chain when the SDK config is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub region: Option<String>,
    pub bucket_location: Option<String>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{value}' for {key}")
            }
        }
    }
}

impl Error for ConfigError {}

impl RuntimeConfig {
    /// Location constraint for new buckets: the explicit override, else the
    /// region the SDK clients resolved.
    pub fn bucket_location_for(&self, sdk_region: Option<&str>) -> String {
        self.bucket_location
            .as_deref()
            .or(sdk_region)
            .unwrap_or(DEFAULT_BUCKET_LOCATION)
            .to_string()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_format = match non_empty(LOG_FORMAT_ENV) {
            Some(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidValue {
                key: LOG_FORMAT_ENV,
                value,
            })?,
            None => LogFormat::Json,
        };

        Ok(Self {
            region: non_empty(REGION_ENV),
            bucket_location: non_empty(BUCKET_LOCATION_ENV),
            log_format,
        })
    }
}
