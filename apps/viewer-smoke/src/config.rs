//! Environment-backed runtime configuration for the smoke binary.

use std::{
    env,
    error::Error,
    fmt,
    path::PathBuf,
};

const DEFAULT_DEMO_DIR: &str = "./.mediarail-smoke-store";
const DEFAULT_DEMO_ENTRIES: usize = 3;

/// Runtime configuration for the demo conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    /// Directory where demo media files are created.
    pub demo_dir: PathBuf,
    /// Number of demo media files to generate.
    pub demo_entries: usize,
    /// Index of the demo file to open the viewer on.
    pub placeholder_index: usize,
}

impl SmokeConfig {
    /// Parse configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let demo_dir = optional_trimmed_env("MEDIARAIL_DEMO_DIR", &mut lookup)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEMO_DIR));
        let demo_entries = parse_optional_usize(
            "MEDIARAIL_DEMO_ENTRIES",
            DEFAULT_DEMO_ENTRIES,
            &mut lookup,
        )?;
        let placeholder_index =
            parse_optional_usize("MEDIARAIL_DEMO_PLACEHOLDER_INDEX", 0, &mut lookup)?;

        if demo_entries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MEDIARAIL_DEMO_ENTRIES",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }
        if placeholder_index >= demo_entries {
            return Err(ConfigError::InvalidValue {
                key: "MEDIARAIL_DEMO_PLACEHOLDER_INDEX",
                value: placeholder_index.to_string(),
                reason: format!("must be below MEDIARAIL_DEMO_ENTRIES ({demo_entries})"),
            });
        }

        Ok(Self {
            demo_dir,
            demo_entries,
            placeholder_index,
        })
    }
}

/// Errors produced while parsing runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key}='{value}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

fn optional_trimmed_env<F>(key: &'static str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_optional_usize<F>(
    key: &'static str,
    default: usize,
    lookup: &mut F,
) -> Result<usize, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    value
        .parse::<usize>()
        .map_err(|err| ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        })
}
