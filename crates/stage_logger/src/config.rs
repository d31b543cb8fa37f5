//! Logger configuration.
//!
//! Values come from the caller ([`LoggerConfig::new`]) or from the
//! process environment ([`LoggerConfig::from_env`]):
//!
//! | variable    | meaning                                   | default |
//! |-------------|-------------------------------------------|---------|
//! | `APP_ENV`   | `dev` for readable lines, anything else JSON | `prod` |
//! | `APP_STAGE` | stage tag bound to every record           | `""`    |
//! | `LOG_LEVEL` | minimum level written                     | `info`  |

use crate::error::LoggerError;
use crate::logging::{Format, Level};

pub const ENV_VAR: &str = "APP_ENV";
pub const STAGE_VAR: &str = "APP_STAGE";
pub const LEVEL_VAR: &str = "LOG_LEVEL";

/// Deployment environment; only decides the presentation of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Dev,
    #[default]
    Prod,
}

impl Environment {
    /// `"dev"` selects [`Environment::Dev`]; every other value is production.
    pub fn parse(value: &str) -> Self {
        if value == "dev" {
            Environment::Dev
        } else {
            Environment::Prod
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Environment::Dev => Format::Pretty,
            Environment::Prod => Format::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub environment: Environment,
    pub stage: String,
    /// Records below this level are dropped. Fatal is always written.
    pub level: Level,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Prod,
            stage: String::new(),
            level: Level::Info,
        }
    }
}

impl LoggerConfig {
    pub fn new(environment: &str, stage: impl Into<String>) -> Self {
        Self {
            environment: Environment::parse(environment),
            stage: stage.into(),
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Build a config entirely from `APP_ENV`, `APP_STAGE` and `LOG_LEVEL`.
    pub fn from_env() -> Result<Self, LoggerError> {
        let environment = std::env::var(ENV_VAR).unwrap_or_default();
        let stage = std::env::var(STAGE_VAR).unwrap_or_default();
        Self::new(&environment, stage).with_env_overrides()
    }

    /// Apply `LOG_LEVEL` on top of this config when it is set.
    pub fn with_env_overrides(self) -> Result<Self, LoggerError> {
        self.with_level_override(std::env::var(LEVEL_VAR).ok().as_deref())
    }

    fn with_level_override(mut self, raw: Option<&str>) -> Result<Self, LoggerError> {
        match raw {
            None => Ok(self),
            Some(raw) if raw.trim().is_empty() => Ok(self),
            Some(raw) => {
                self.level = raw.parse().map_err(|_| LoggerError::InvalidConfig {
                    var: LEVEL_VAR,
                    reason: format!("unknown level {raw:?}"),
                })?;
                Ok(self)
            }
        }
    }
}
