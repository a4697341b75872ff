use thiserror::Error;

/// Top-level error type for shared OpenWorm concerns.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unknown {selector} selector: {value}")]
    UnknownSelector { selector: &'static str, value: String },
}
