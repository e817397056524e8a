pub mod exports;

use thiserror::Error;

pub use exports::clash::{proxy_to_clash, try_proxy_to_clash, DEFAULT_CLASH_TEMPLATE};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template error: {0}")]
    Template(serde_yaml::Error),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Serialization error: {0}")]
    Serialize(serde_yaml::Error),
}
