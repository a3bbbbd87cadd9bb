//! User DTOs - sign-up, login and the public user shape

use crate::entities::User;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// User as exposed to clients and embedded in the session token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SafeUserDTO {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl From<User> for SafeUserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            username: value.username,
        }
    }
}

/// `{ "user": ... }`, with `null` when nobody is logged in
#[derive(Serialize, Debug)]
pub struct SessionDTO {
    pub user: Option<SafeUserDTO>,
}

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupDTO {
    #[validate(
        required(message = "First Name is required"),
        length(min = 1, message = "First Name is required")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last Name is required"),
        length(min = 1, message = "Last Name is required")
    )]
    pub last_name: Option<String>,

    #[validate(required(message = "Invalid email"), email(message = "Invalid email"))]
    pub email: Option<String>,

    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Password must be 6 characters or more"),
        length(min = 6, message = "Password must be 6 characters or more")
    )]
    pub password: Option<String>,
}

/// Row data for a new user; the password is already hashed
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub hashed_password: String,
}

#[derive(Deserialize, Debug, Validate)]
pub struct LoginDTO {
    #[validate(
        required(message = "Credential must either be an email or a username with at least 4 characters"),
        custom(
            function = "validate_credential",
            message = "Credential must either be an email or a username with at least 4 characters"
        )
    )]
    pub credential: Option<String>,

    #[validate(
        required(message = "Password is required and needs to be at least 6 characters"),
        length(min = 6, message = "Password is required and needs to be at least 6 characters")
    )]
    pub password: Option<String>,
}

/// A credential is either an email address or a username of 4+ characters
fn validate_credential(credential: &str) -> Result<(), ValidationError> {
    use validator::ValidateEmail;
    if credential.validate_email() || credential.trim().chars().count() >= 4 {
        Ok(())
    } else {
        Err(ValidationError::new("credential"))
    }
}
