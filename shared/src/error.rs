//! Error types for reqkit.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read attribute '{name}': {reason}")]
    AttributeRead { name: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Parameter source is not an object")]
    NotAnObject,

    #[error("No active remote call")]
    NoActiveCall,

    #[error("Unknown host: {0}")]
    UnknownHost(String),

    #[error("Client error: {0}")]
    Client(String),
}
