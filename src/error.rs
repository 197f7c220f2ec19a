use thiserror::Error;

/// Errors that can occur while editing or submitting a form
#[derive(Error, Debug)]
pub enum FormError {
    /// One or more fields failed validation, submission was blocked
    #[error("Form has validation errors")]
    Invalid,

    /// A selected file does not declare an image content type
    #[error("Not an image file: {0}")]
    NotAnImage(String),

    /// Removing the entry would leave the list empty
    #[error("At least one {0} must remain")]
    LastEntry(&'static str),

    /// No entry with the given synthetic id
    #[error("No {kind} with id {id}")]
    UnknownEntry { kind: &'static str, id: u32 },

    /// The user declined a confirmation prompt
    #[error("Action cancelled by the user")]
    Cancelled,

    /// The update or registration callback rejected the payload
    #[error("Submission failed: {0}")]
    Submit(String),

    /// Failed to reach the backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to read a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
