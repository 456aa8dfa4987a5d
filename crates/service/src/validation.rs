//! Identifier parsing shared by every operation that takes an id from a path.

use crate::errors::ServiceError;

/// Parse a record id from its path form.
///
/// `what` names the record in the error message ("Roadmap", "Issue").
/// Blank input is "missing"; anything that is not a non-negative 64-bit
/// decimal is "invalid".
pub fn parse_id(raw: &str, what: &str) -> Result<i64, ServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidArgument(format!("{what} id is missing.")));
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(ServiceError::InvalidArgument(format!("{what} id is invalid."))),
    }
}
