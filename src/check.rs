//! Input shape checks shared by the methods.

use crate::{AppError, AppResult};

pub fn non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} must be a non-empty string")));
    }
    Ok(())
}

pub fn maybe_non_empty(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(value) => non_empty(field, value),
        None => Ok(()),
    }
}
