//! Input validation functions
//!
//! Reusable validators for request input. Clients can use them for
//! pre-validation; the server uses them for enforcement.

mod document_name;
mod password;
mod translation_text;
mod username;

pub use document_name::{DocumentNameError, MAX_DOCUMENT_NAME_LENGTH, validate_document_name};
pub use password::{
    MAX_PASSWORD_LENGTH, PasswordError, validate_password, validate_password_input,
};
pub use translation_text::{
    MAX_TRANSLATION_TEXT_LENGTH, TranslationTextError, validate_translation_text,
};
pub use username::{MAX_USERNAME_LENGTH, UsernameError, validate_username};
