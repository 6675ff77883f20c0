use serde::Deserialize;

/// Request handling limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Largest accepted JSON request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_body_bytes() -> usize {
    1_048_576
}
