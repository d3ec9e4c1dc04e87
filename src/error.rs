use thiserror::Error;

use crate::auth::Role;

/// Form validation failures. Nothing is committed when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Center name is required")]
    MissingName,

    #[error("Center number is required")]
    MissingNumber,

    #[error("Emergency contact name and mobile are required")]
    IncompleteEmergencyContact,

    #[error("Password must not be empty")]
    EmptyPassword,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Wrong {0} password")]
    InvalidCredentials(Role),

    #[error("Login required")]
    NotLoggedIn,

    #[error("Admin login required")]
    AccessDenied,

    #[error("No center with id {0}")]
    CenterNotFound(String),

    #[error("No person with id {0} in the current draft")]
    PersonNotFound(String),

    #[error("No center is being edited")]
    NoDraft,

    #[error("Malformed backup file: {0}")]
    MalformedImport(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DirectoryError> = std::result::Result<T, E>;
