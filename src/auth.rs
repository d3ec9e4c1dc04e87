use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, ValidationError};

pub const DEFAULT_USER_PASSWORD: &str = "EPZArmy";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// The two shared passwords. Stored and compared as plain text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_password: String,
    pub admin_password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user_password: DEFAULT_USER_PASSWORD.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Credentials {
    pub fn password(&self, role: Role) -> &str {
        match role {
            Role::User => &self.user_password,
            Role::Admin => &self.admin_password,
        }
    }

    pub fn verify(&self, role: Role, input: &str) -> Result<(), DirectoryError> {
        if input == self.password(role) {
            Ok(())
        } else {
            Err(DirectoryError::InvalidCredentials(role))
        }
    }

    pub fn set_password(&mut self, role: Role, new_password: String) -> Result<(), ValidationError> {
        if new_password.trim().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        match role {
            Role::User => self.user_password = new_password,
            Role::Admin => self.admin_password = new_password,
        }
        Ok(())
    }
}

/// Persisted login gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub admin_logged_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_exact_match_only() {
        let creds = Credentials::default();
        assert!(creds.verify(Role::User, "EPZArmy").is_ok());
        assert!(creds.verify(Role::Admin, "admin123").is_ok());

        for wrong in ["", "epzarmy", "EPZArmy ", "admin123", " EPZArmy"] {
            assert!(
                matches!(creds.verify(Role::User, wrong), Err(DirectoryError::InvalidCredentials(Role::User))),
                "{wrong:?} must not match"
            );
        }
        assert!(creds.verify(Role::Admin, "EPZArmy").is_err());
    }

    #[test]
    fn test_set_password_rejects_blank() {
        let mut creds = Credentials::default();
        assert_eq!(creds.set_password(Role::Admin, "  ".to_string()), Err(ValidationError::EmptyPassword));
        assert_eq!(creds.admin_password, DEFAULT_ADMIN_PASSWORD);

        creds.set_password(Role::User, "new-pass".to_string()).unwrap();
        assert_eq!(creds.password(Role::User), "new-pass");
        assert_eq!(creds.password(Role::Admin), DEFAULT_ADMIN_PASSWORD);
    }
}
