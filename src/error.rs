use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("carousel needs at least 2 items, got {0}")]
    TooFewItems(usize),
    #[error("container width must be positive and finite, got {0}")]
    InvalidWidth(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
