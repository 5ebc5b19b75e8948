//! Web application firewall policy fields.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{ValidationError, ValidationResult};

/// Custom block response bodies are sent base64 encoded.
pub fn custom_block_response_body(value: &str, key: &str) -> ValidationResult {
    match STANDARD.decode(value) {
        Ok(_) => Ok(()),
        Err(err) => Err(vec![ValidationError::new(
            key,
            format!("{key:?} must be a base64 encoded string, got {value:?}: {err}"),
        )]),
    }
}
