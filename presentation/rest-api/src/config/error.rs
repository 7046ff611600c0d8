/// Configuration errors raised while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config.missing: {0}")]
    Missing(&'static str),
    #[error("config.invalid: {name} ({reason})")]
    Invalid { name: &'static str, reason: String },
}
