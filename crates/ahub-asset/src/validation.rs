//! # Request Validation
//!
//! Structural checks shared by every fetch and push operation:
//!
//! - at least one URI must be given;
//! - every qualifier name must be in the server's supported set.
//!
//! Unsupported qualifiers are reported together, one [`FieldViolation`]
//! per name in `requested \ supported`.

use ahub_core::QualifierSet;

use crate::error::{Operation, ValidationError};
use crate::types::AssetRequest;

pub const UNSUPPORTED_QUALIFIERS_MESSAGE: &str = "Unsupported Qualifier(s) found in request.";

/// Check `request` against the structural rules for `operation`.
pub fn validate_request<R>(
    operation: Operation,
    request: &R,
    supported: &QualifierSet,
) -> Result<(), ValidationError>
where
    R: AssetRequest + ?Sized,
{
    if request.uris().is_empty() {
        return Err(ValidationError {
            operation,
            message: format!(
                "{operation} does not support requests without any URIs specified."
            ),
            violations: Vec::new(),
        });
    }

    let unsupported = QualifierSet::from_qualifiers(request.qualifiers()).difference(supported);
    if !unsupported.is_empty() {
        return Err(ValidationError {
            operation,
            message: UNSUPPORTED_QUALIFIERS_MESSAGE.to_string(),
            violations: unsupported.unsupported_violations(),
        });
    }

    Ok(())
}
