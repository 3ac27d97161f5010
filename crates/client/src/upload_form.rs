//! Create and edit forms that carry files.
//!
//! A form collects text fields, single-file fields and (for multi-image
//! entities) an image list edit into an [`UploadDraft`]. Submitting
//! validates the draft with the same rules the server applies, then sends
//! one multipart request. Nothing is sent when validation fails, and the
//! draft is never cleared by a failed submission.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

use festival_core::error::CoreError;
use festival_core::notice::Notice;
use festival_core::roles::Permissions;
use festival_core::types::DbId;
use festival_core::upload::{require_text, validate_image, ImageSetEdit};

use crate::error::{ClientError, ClientResult};
use crate::models::Resource;
use crate::notifier::Notifier;
use crate::service::{FileDraft, UploadRequest, UploadService};

/// Multipart field carrying appended images.
pub const IMAGES_FIELD: &str = "images";

/// Multipart field carrying the JSON array of image positions to drop.
pub const REMOVE_INDICES_FIELD: &str = "remove_indices";

/// Unsent form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub fields: BTreeMap<String, String>,
    /// Single-file fields. A field with no entry keeps its stored file.
    pub files: BTreeMap<String, FileDraft>,
    /// Stored images of the entity being edited, in display order.
    pub existing_images: Vec<String>,
    pub remove_indices: Vec<usize>,
    pub added_images: Vec<FileDraft>,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A create or edit form for `T`.
pub struct UploadForm<T, S, N> {
    service: S,
    notifier: N,
    permissions: Permissions,
    /// `None` creates a new entity; `Some(id)` edits that one.
    target: Option<DbId>,
    required_fields: Vec<(&'static str, &'static str)>,
    required_files: Vec<(&'static str, &'static str)>,
    draft: UploadDraft,
    in_flight: AtomicBool,
    _resource: PhantomData<fn() -> T>,
}

impl<T, S, N> UploadForm<T, S, N>
where
    T: Resource,
    S: UploadService,
    N: Notifier,
{
    /// A blank form for a new entity.
    pub fn create(service: S, notifier: N, permissions: Permissions) -> Self {
        Self::build(service, notifier, permissions, None)
    }

    /// A form editing entity `id`.
    pub fn edit(service: S, notifier: N, permissions: Permissions, id: DbId) -> Self {
        Self::build(service, notifier, permissions, Some(id))
    }

    fn build(service: S, notifier: N, permissions: Permissions, target: Option<DbId>) -> Self {
        Self {
            service,
            notifier,
            permissions,
            target,
            required_fields: Vec::new(),
            required_files: Vec::new(),
            draft: UploadDraft::default(),
            in_flight: AtomicBool::new(false),
            _resource: PhantomData,
        }
    }

    /// Require a non-blank text field. On an edit form the check applies
    /// only when the field is part of the draft.
    pub fn require(mut self, name: &'static str, label: &'static str) -> Self {
        self.required_fields.push((name, label));
        self
    }

    /// Require a file when creating. Edits keep the stored file.
    pub fn require_file(mut self, name: &'static str, label: &'static str) -> Self {
        self.required_files.push((name, label));
        self
    }

    /// Start an edit from the entity's stored images.
    pub fn with_existing_images(mut self, images: Vec<String>) -> Self {
        self.draft.existing_images = images;
        self
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.draft.fields.insert(name.into(), value.into());
    }

    pub fn attach_file(&mut self, name: impl Into<String>, file: FileDraft) {
        self.draft.files.insert(name.into(), file);
    }

    pub fn add_image(&mut self, file: FileDraft) {
        self.draft.added_images.push(file);
    }

    /// Mark a stored image for removal by its position.
    pub fn remove_existing_image(&mut self, index: usize) {
        if !self.draft.remove_indices.contains(&index) {
            self.draft.remove_indices.push(index);
        }
    }

    /// Empty the draft, keeping the stored images it started from.
    pub fn reset(&mut self) {
        let existing = std::mem::take(&mut self.draft.existing_images);
        self.draft = UploadDraft {
            existing_images: existing,
            ..UploadDraft::default()
        };
    }

    /// Validate the draft and send it as one multipart request.
    ///
    /// Returns [`ClientError::Busy`] without a notice while an earlier
    /// submission from this form is still outstanding.
    pub async fn submit(&self) -> ClientResult<T> {
        let _in_flight = InFlight::acquire(&self.in_flight).ok_or(ClientError::Busy)?;

        let allowed = match self.target {
            Some(_) => self.permissions.require_edit(),
            None => self.permissions.require_create(),
        };
        if let Err(err) = allowed {
            let err = ClientError::from(err);
            self.notifier.notify(err.to_notice("Not allowed"));
            return Err(err);
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(resource = T::PATH, error = %err, "Form rejected before sending");
                self.notifier.notify(err.to_notice("Please check the form"));
                return Err(err);
            }
        };

        let result = self
            .service
            .submit(request)
            .await
            .and_then(|body| serde_json::from_value::<T>(body).map_err(ClientError::from));

        match result {
            Ok(entity) => {
                let verb = if self.target.is_some() { "updated" } else { "created" };
                tracing::info!(resource = T::PATH, id = entity.id(), "Form saved");
                self.notifier
                    .notify(Notice::success(format!("{} {verb}", T::LABEL)));
                Ok(entity)
            }
            Err(err) => {
                tracing::warn!(
                    resource = T::PATH,
                    entity_id = ?self.target,
                    error = %err,
                    "Form submission failed"
                );
                self.notifier.notify(
                    err.to_notice(&format!("Failed to save {}", T::LABEL.to_lowercase())),
                );
                Err(err)
            }
        }
    }

    fn build_request(&self) -> ClientResult<UploadRequest> {
        let draft = &self.draft;

        for (name, label) in &self.required_fields {
            let value = draft.fields.get(*name);
            if self.target.is_none() || value.is_some() {
                require_text(label, value.map(String::as_str).unwrap_or_default())?;
            }
        }
        if self.target.is_none() {
            for (name, label) in &self.required_files {
                if !draft.files.contains_key(*name) {
                    return Err(ClientError::Validation(format!("{label} is required")));
                }
            }
        }

        for file in draft.files.values().chain(&draft.added_images) {
            check_file(file)?;
        }

        let images = ImageSetEdit {
            existing: draft.existing_images.clone(),
            remove_indices: draft.remove_indices.clone(),
            added: draft.added_images.clone(),
        }
        .plan()?;

        let mut fields: Vec<(String, String)> = draft
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if self.target.is_some() && !images.removed.is_empty() {
            fields.push((
                REMOVE_INDICES_FIELD.to_string(),
                serde_json::to_string(&draft.remove_indices)?,
            ));
        }

        let files = draft
            .files
            .iter()
            .map(|(name, file)| (name.clone(), file.clone()))
            .chain(
                images
                    .added
                    .into_iter()
                    .map(|file| (IMAGES_FIELD.to_string(), file)),
            )
            .collect();

        Ok(UploadRequest {
            resource: T::PATH,
            target: self.target,
            fields,
            files,
        })
    }
}

fn check_file(file: &FileDraft) -> Result<(), CoreError> {
    validate_image(&file.content_type, file.bytes.len()).map_err(|err| match err {
        CoreError::Validation(msg) => CoreError::Validation(format!("{}: {msg}", file.file_name)),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use festival_core::roles::Role;
    use festival_core::upload::MAX_IMAGE_BYTES;

    use super::*;
    use crate::models::AboutItem;
    use crate::testing::{about_item_json, FakeUploads, RecordingNotifier};

    type Form = UploadForm<AboutItem, FakeUploads, Arc<RecordingNotifier>>;

    fn png(name: &str) -> FileDraft {
        FileDraft {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    fn create_form(uploads: &FakeUploads) -> (Form, Arc<RecordingNotifier>) {
        let notifier = RecordingNotifier::new();
        let mut form: Form = UploadForm::create(
            uploads.clone(),
            notifier.clone(),
            Permissions::for_role(Role::Editor),
        )
        .require("title", "Title");
        form.set_field("title", "Our history");
        (form, notifier)
    }

    fn with_images(form: &mut Form, count: usize) {
        for i in 0..count {
            form.add_image(png(&format!("photo-{i}.png")));
        }
    }

    #[tokio::test]
    async fn ten_images_are_sent() {
        let uploads = FakeUploads::default();
        uploads.respond_with(about_item_json(1, 10));
        let (mut form, notifier) = create_form(&uploads);
        with_images(&mut form, 10);

        let item = form.submit().await.unwrap();

        assert_eq!(item.images.len(), 10);
        let requests = uploads.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].resource, "about-items");
        assert_eq!(requests[0].files.len(), 10);
        assert!(requests[0].files.iter().all(|(name, _)| name == IMAGES_FIELD));
        assert_eq!(notifier.last(), Some(Notice::success("About item created")));
    }

    #[tokio::test]
    async fn eleven_images_never_reach_the_network() {
        let uploads = FakeUploads::default();
        let (mut form, notifier) = create_form(&uploads);
        with_images(&mut form, 11);

        let err = form.submit().await.unwrap_err();

        assert_matches!(err, ClientError::Validation(ref msg) if msg.contains("at most 10"));
        assert!(uploads.requests().is_empty());
        assert_eq!(form.draft().added_images.len(), 11);
        assert_eq!(notifier.notices().len(), 1);
        assert!(notifier.last().unwrap().is_error());
    }

    #[tokio::test]
    async fn blank_required_field_is_rejected_locally() {
        let uploads = FakeUploads::default();
        let (mut form, notifier) = create_form(&uploads);
        form.set_field("title", "   ");

        let err = form.submit().await.unwrap_err();

        assert_matches!(err, ClientError::Validation(_));
        assert_eq!(notifier.last().unwrap().message, "Title is required");
        assert!(uploads.requests().is_empty());
    }

    #[tokio::test]
    async fn wrong_file_type_is_rejected_locally() {
        let uploads = FakeUploads::default();
        let (mut form, _notifier) = create_form(&uploads);
        form.add_image(FileDraft {
            file_name: "brochure.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        });

        let err = form.submit().await.unwrap_err();

        assert!(err.user_message("").starts_with("brochure.pdf:"));
        assert!(uploads.requests().is_empty());
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_locally() {
        let uploads = FakeUploads::default();
        let (mut form, _notifier) = create_form(&uploads);
        form.add_image(FileDraft {
            bytes: vec![0; MAX_IMAGE_BYTES + 1],
            ..png("huge.png")
        });

        assert_matches!(form.submit().await, Err(ClientError::Validation(_)));
        assert!(uploads.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_required_file_on_create() {
        let uploads = FakeUploads::default();
        let (form, notifier) = create_form(&uploads);
        let form = form.require_file("cover_image", "Cover image");

        assert_matches!(form.submit().await, Err(ClientError::Validation(_)));
        assert_eq!(notifier.last().unwrap().message, "Cover image is required");
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_draft() {
        let uploads = FakeUploads::default();
        uploads.fail_with(500, "");
        let (mut form, notifier) = create_form(&uploads);
        with_images(&mut form, 2);
        let before = form.draft().clone();

        let err = form.submit().await.unwrap_err();

        assert_matches!(err, ClientError::Api { status: 500, .. });
        assert_eq!(form.draft(), &before);
        assert_eq!(
            notifier.last().unwrap().message,
            "Failed to save about item"
        );
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn edit_sends_removals_and_additions() {
        let uploads = FakeUploads::default();
        uploads.respond_with(about_item_json(7, 10));
        let existing: Vec<String> = (0..10).map(|i| format!("/uploads/about/{i}.png")).collect();
        let notifier = RecordingNotifier::new();
        let mut form: Form = UploadForm::edit(
            uploads.clone(),
            notifier.clone(),
            Permissions::for_role(Role::Editor),
            7,
        )
        .require("title", "Title")
        .with_existing_images(existing);

        form.remove_existing_image(3);
        form.remove_existing_image(3);
        form.add_image(png("new.png"));

        form.submit().await.unwrap();

        let request = &uploads.requests()[0];
        assert_eq!(request.target, Some(7));
        assert_eq!(
            request.fields,
            vec![(REMOVE_INDICES_FIELD.to_string(), "[3]".to_string())]
        );
        assert_eq!(request.files.len(), 1);
        assert_eq!(notifier.last(), Some(Notice::success("About item updated")));
    }

    #[tokio::test]
    async fn edit_past_limit_is_rejected() {
        let uploads = FakeUploads::default();
        let existing: Vec<String> = (0..10).map(|i| format!("/uploads/about/{i}.png")).collect();
        let mut form: Form = UploadForm::edit(
            uploads.clone(),
            RecordingNotifier::new(),
            Permissions::for_role(Role::Admin),
            7,
        )
        .with_existing_images(existing);
        form.add_image(png("one-too-many.png"));

        assert_matches!(form.submit().await, Err(ClientError::Validation(_)));
        assert!(uploads.requests().is_empty());
    }

    #[tokio::test]
    async fn duplicate_submission_is_busy() {
        let uploads = FakeUploads::yielding();
        uploads.respond_with(about_item_json(1, 0));
        let (form, notifier) = create_form(&uploads);

        let (first, second) = tokio::join!(form.submit(), form.submit());

        assert!(first.is_ok());
        assert_matches!(second, Err(ClientError::Busy));
        assert_eq!(uploads.requests().len(), 1);
        assert_eq!(notifier.notices().len(), 1);

        assert!(form.submit().await.is_ok());
    }

    #[tokio::test]
    async fn viewer_cannot_submit() {
        let uploads = FakeUploads::default();
        let form: Form = UploadForm::create(
            uploads.clone(),
            RecordingNotifier::new(),
            Permissions::for_role(Role::Viewer),
        );

        assert_matches!(form.submit().await, Err(ClientError::Forbidden(_)));
        assert!(uploads.requests().is_empty());
    }
}
