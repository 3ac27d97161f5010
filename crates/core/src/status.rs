//! Submission review statuses.

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SHORTLISTED: &str = "shortlisted";
pub const STATUS_SELECTED: &str = "selected";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid submission statuses, in review order.
pub const SUBMISSION_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_SHORTLISTED,
    STATUS_SELECTED,
    STATUS_REJECTED,
];

/// Validate that `status` is one of [`SUBMISSION_STATUSES`].
pub fn validate_submission_status(status: &str) -> Result<(), CoreError> {
    if SUBMISSION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            SUBMISSION_STATUSES.join(", ")
        )))
    }
}
