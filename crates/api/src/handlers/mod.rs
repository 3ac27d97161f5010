pub mod about_item;
pub mod award;
pub mod category;
pub mod contact;
pub mod curated_image;
pub mod event;
pub mod registration;
pub mod session_plan;
pub mod submission;
pub mod workshop;

use crate::error::AppResult;
use crate::storage::FileStore;

/// Finish an insert that follows freshly stored files. If the insert
/// fails, the files are removed again.
pub(crate) async fn finish_create<T>(
    storage: &FileStore,
    stored: &[String],
    result: Result<T, sqlx::Error>,
) -> AppResult<T> {
    match result {
        Ok(row) => Ok(row),
        Err(e) => {
            storage.remove_all(stored).await;
            Err(e.into())
        }
    }
}

/// Finish an update that follows freshly stored files. If the update fails
/// or the row is gone, the files are removed again and `missing` is
/// returned for the latter.
pub(crate) async fn finish_update<T>(
    storage: &FileStore,
    stored: &[String],
    result: Result<Option<T>, sqlx::Error>,
    missing: crate::error::AppError,
) -> AppResult<T> {
    match result {
        Ok(Some(row)) => Ok(row),
        Ok(None) => {
            storage.remove_all(stored).await;
            Err(missing)
        }
        Err(e) => {
            storage.remove_all(stored).await;
            Err(e.into())
        }
    }
}
