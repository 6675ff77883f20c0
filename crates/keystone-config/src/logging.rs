use serde::Deserialize;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `keystone_cache=debug,info`
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format selector
    #[serde(default)]
    pub environment: Environment,
    /// Label attached to every event emitted through the logger
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            environment: Environment::default(),
            prefix: None,
        }
    }
}

/// Deployment environment, which decides the log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// JSON lines
    #[default]
    Production,
    /// Human-readable text
    Development,
}

fn default_level() -> String {
    "info".to_owned()
}
