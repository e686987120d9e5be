// Credential handling: password hashing and email validation

pub mod password;

pub use password::{hash_password, is_valid_email, normalize_email, verify_password, PasswordError};
