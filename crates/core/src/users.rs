//! User field rules beyond simple presence checks.
//!
//! Brazilian-format national id (CPF) and phone strings, and the
//! role/specialty coupling: evaluators must declare a specialty.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::roles::Role;

/// CPF in the canonical `999.999.999-99` presentation.
static CPF_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap());

/// Phone in the `(99) 99999-9999` presentation.
static PHONE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{5}-\d{4}$").unwrap());

pub fn validate_cpf(cpf: &str) -> Result<(), CoreError> {
    if CPF_FORMAT.is_match(cpf) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "CPF '{cpf}' must use the format 999.999.999-99"
        )))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if PHONE_FORMAT.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Phone '{phone}' must use the format (99) 99999-9999"
        )))
    }
}

/// Evaluators must declare a specialty; for other roles it is optional.
pub fn validate_specialty(role: Role, specialty: Option<&str>) -> Result<(), CoreError> {
    match role {
        Role::Evaluator => {
            let present = specialty.is_some_and(|s| !s.trim().is_empty());
            if present {
                Ok(())
            } else {
                Err(CoreError::Validation(
                    "Evaluators must declare a specialty".to_string(),
                ))
            }
        }
        Role::Author | Role::Admin => Ok(()),
    }
}
