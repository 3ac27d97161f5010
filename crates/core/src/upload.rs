//! Form and file-upload validation.
//!
//! Shared by the multipart handlers on the server and the upload forms in
//! the client, so a request the client lets through is one the server
//! accepts and vice versa. Validation always runs before any file is
//! written or any request is sent.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum size of a single uploaded image (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for image uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum number of images attached to a multi-image entity.
pub const MAX_IMAGES_PER_ITEM: usize = 10;

// ---------------------------------------------------------------------------
// Text and number fields
// ---------------------------------------------------------------------------

/// Trim `value`, rejecting it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional field, mapping blank input to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a numeric form field, falling back to zero when it is not a number.
pub fn parse_number_or_zero<T>(value: &str) -> T
where
    T: FromStr + Default,
{
    value.trim().parse().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Check an image's declared MIME type and size against the upload limits.
pub fn validate_image(content_type: &str, size: usize) -> Result<(), CoreError> {
    let content_type = content_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image type '{content_type}'. Allowed: JPEG, PNG, GIF, WebP"
        )));
    }
    if size == 0 {
        return Err(CoreError::Validation("Image file is empty".to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "Image exceeds the maximum size of {} MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// File extension used when storing an image of the given MIME type.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Single-file field on an edit form.
///
/// Leaving the file input empty keeps the stored reference; choosing a file
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange<F> {
    Keep,
    Replace(F),
}

impl<F> FileChange<F> {
    pub fn from_option(file: Option<F>) -> Self {
        match file {
            Some(file) => FileChange::Replace(file),
            None => FileChange::Keep,
        }
    }

    pub fn new_file(&self) -> Option<&F> {
        match self {
            FileChange::Keep => None,
            FileChange::Replace(file) => Some(file),
        }
    }
}

// ---------------------------------------------------------------------------
// Multi-image edits
// ---------------------------------------------------------------------------

/// An edit to an ordered image list: drop some existing images by index and
/// append new files, all in one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSetEdit<F> {
    /// Stored references currently attached, in display order.
    pub existing: Vec<String>,
    /// Indices into `existing` to drop. Duplicates are ignored.
    pub remove_indices: Vec<usize>,
    /// New files to append after the kept images.
    pub added: Vec<F>,
}

/// Outcome of a validated [`ImageSetEdit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSetPlan<F> {
    /// Existing references that stay, in their original order.
    pub kept: Vec<String>,
    /// Existing references to delete once the update is committed.
    pub removed: Vec<String>,
    pub added: Vec<F>,
}

impl<F> ImageSetPlan<F> {
    pub fn total(&self) -> usize {
        self.kept.len() + self.added.len()
    }
}

impl<F> ImageSetEdit<F> {
    /// Validate the edit and split existing images into kept and removed.
    ///
    /// Rejects out-of-range removal indices and results with more than
    /// [`MAX_IMAGES_PER_ITEM`] images.
    pub fn plan(self) -> Result<ImageSetPlan<F>, CoreError> {
        let remove: BTreeSet<usize> = self.remove_indices.into_iter().collect();
        if let Some(&bad) = remove.iter().find(|&&i| i >= self.existing.len()) {
            return Err(CoreError::Validation(format!(
                "Cannot remove image {bad}: item has {} image(s)",
                self.existing.len()
            )));
        }

        let (removed, kept): (Vec<_>, Vec<_>) = self
            .existing
            .into_iter()
            .enumerate()
            .partition(|(i, _)| remove.contains(i));
        let kept: Vec<String> = kept.into_iter().map(|(_, path)| path).collect();
        let removed: Vec<String> = removed.into_iter().map(|(_, path)| path).collect();

        check_image_count(kept.len() + self.added.len())?;

        Ok(ImageSetPlan {
            kept,
            removed,
            added: self.added,
        })
    }
}

/// Reject image counts above [`MAX_IMAGES_PER_ITEM`].
pub fn check_image_count(total: usize) -> Result<(), CoreError> {
    if total > MAX_IMAGES_PER_ITEM {
        return Err(CoreError::Validation(format!(
            "An item can hold at most {MAX_IMAGES_PER_ITEM} images ({total} given)"
        )));
    }
    Ok(())
}

/// Parse the `remove_indices` form field: a JSON array of indices, or blank.
pub fn parse_remove_indices(value: &str) -> Result<Vec<usize>, CoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(value).map_err(|_| {
        CoreError::Validation(
            "remove_indices must be a JSON array of non-negative integers".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("about/{i}.jpg")).collect()
    }

    // -- text fields ----------------------------------------------------------

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("Title", "  Jury  ").unwrap(), "Jury");
    }

    #[test]
    fn require_text_rejects_blank() {
        let err = require_text("Title", " \t ").unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn numbers_default_to_zero() {
        assert_eq!(parse_number_or_zero::<i32>("42"), 42);
        assert_eq!(parse_number_or_zero::<i32>(" 7 "), 7);
        assert_eq!(parse_number_or_zero::<i32>("seven"), 0);
        assert_eq!(parse_number_or_zero::<i32>(""), 0);
        assert_eq!(parse_number_or_zero::<f64>("1.5"), 1.5);
    }

    // -- files ----------------------------------------------------------------

    #[test]
    fn allowed_image_types_accepted() {
        for ty in ALLOWED_IMAGE_TYPES {
            assert!(validate_image(ty, 1024).is_ok(), "{ty} should be accepted");
        }
        assert!(validate_image("IMAGE/PNG", 1024).is_ok());
    }

    #[test]
    fn other_types_rejected() {
        assert!(validate_image("image/svg+xml", 10).is_err());
        assert!(validate_image("application/pdf", 10).is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_image("image/jpeg", MAX_IMAGE_BYTES).is_ok());
        let err = validate_image("image/jpeg", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("5 MB"));
        assert!(validate_image("image/jpeg", 0).is_err());
    }

    #[test]
    fn extensions_follow_mime_type() {
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/webp"), Some("webp"));
        assert_eq!(image_extension("text/plain"), None);
    }

    #[test]
    fn file_change_from_option() {
        assert_eq!(FileChange::<u8>::from_option(None), FileChange::Keep);
        assert_eq!(FileChange::from_option(Some(3)).new_file(), Some(&3));
    }

    // -- image sets -----------------------------------------------------------

    #[test]
    fn exactly_max_images_accepted() {
        let edit = ImageSetEdit {
            existing: paths(4),
            remove_indices: vec![],
            added: vec![(); 6],
        };
        assert_eq!(edit.plan().unwrap().total(), MAX_IMAGES_PER_ITEM);
    }

    #[test]
    fn one_more_than_max_rejected() {
        let edit = ImageSetEdit {
            existing: paths(4),
            remove_indices: vec![],
            added: vec![(); 7],
        };
        let err = edit.plan().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("at most 10"));
    }

    #[test]
    fn removals_make_room_for_additions() {
        let edit = ImageSetEdit {
            existing: paths(10),
            remove_indices: vec![1, 8],
            added: vec!["new-a", "new-b"],
        };
        let plan = edit.plan().unwrap();
        assert_eq!(plan.total(), 10);
        assert_eq!(plan.removed, vec!["about/1.jpg", "about/8.jpg"]);
        assert_eq!(plan.kept[0], "about/0.jpg");
        assert_eq!(plan.kept[1], "about/2.jpg");
        assert_eq!(plan.added, vec!["new-a", "new-b"]);
    }

    #[test]
    fn duplicate_removal_indices_ignored() {
        let edit: ImageSetEdit<()> = ImageSetEdit {
            existing: paths(3),
            remove_indices: vec![0, 0, 2],
            added: vec![],
        };
        let plan = edit.plan().unwrap();
        assert_eq!(plan.kept, vec!["about/1.jpg"]);
        assert_eq!(plan.removed.len(), 2);
    }

    #[test]
    fn out_of_range_removal_rejected() {
        let edit: ImageSetEdit<()> = ImageSetEdit {
            existing: paths(2),
            remove_indices: vec![2],
            added: vec![],
        };
        assert!(edit.plan().is_err());
    }

    #[test]
    fn remove_indices_parsing() {
        assert_eq!(parse_remove_indices("").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_remove_indices("[0, 3]").unwrap(), vec![0, 3]);
        assert!(parse_remove_indices("[-1]").is_err());
        assert!(parse_remove_indices("0,3").is_err());
    }
}
