//! Submitted forms and the rules they are checked against.

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "password_differs_from_username"))]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters."),
        custom(function = "username_chars")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(
        length(min = 8, message = "This password is too short. It must contain at least 8 characters."),
        custom(function = "not_entirely_numeric")
    )]
    pub password1: String,

    #[serde(default)]
    #[validate(must_match(other = "password1", message = "The two password fields didn't match."))]
    pub password2: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters."),
        custom(function = "username_chars")
    )]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "optional_email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Bio must be at most 500 characters."))]
    pub bio: String,

    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub avatar: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RoomForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Topic must be 1 to 200 characters."))]
    pub topic: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters."))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl RoomForm {
    /// Surrounding whitespace is not part of a name.
    pub fn trimmed(self) -> RoomForm {
        RoomForm {
            topic: self.topic.trim().to_owned(),
            name: self.name.trim().to_owned(),
            description: self.description,
        }
    }
}

fn username_chars(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username_chars")
            .with_message("Username may contain only letters, numbers, and @/./+/-/_ characters.".into()))
    }
}

fn not_entirely_numeric(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        Err(ValidationError::new("password_numeric")
            .with_message("This password is entirely numeric.".into()))
    } else {
        Ok(())
    }
}

fn password_differs_from_username(form: &RegisterForm) -> Result<(), ValidationError> {
    if !form.username.is_empty() && form.password1.eq_ignore_ascii_case(&form.username) {
        Err(ValidationError::new("password_similar")
            .with_message("The password is too similar to the username.".into()))
    } else {
        Ok(())
    }
}

fn optional_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Enter a valid email address.".into()))
    }
}

fn optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || url.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Enter a valid URL.".into()))
    }
}

/// Flattens validation errors into display strings, ordered by field name.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .collect()
}
