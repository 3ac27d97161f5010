//! Dashboard list pages: one fetched collection, narrowed and paged
//! locally.

use std::marker::PhantomData;

use festival_core::listing::{ListState, Page};
use festival_core::notice::Notice;
use festival_core::roles::Permissions;
use festival_core::types::DbId;

use crate::error::{ClientError, ClientResult};
use crate::models::{Contact, Resource};
use crate::notifier::Notifier;
use crate::service::{CollectionService, ContactService};

/// A list view over every `T` on the server.
///
/// The whole collection is fetched once by [`load`](Self::load); search,
/// filters and paging then work on the local copy. Deletions and contact
/// follow-ups patch that copy after the server confirms them.
pub struct ListPage<T, S, N> {
    service: S,
    notifier: N,
    permissions: Permissions,
    items: Vec<T>,
    state: ListState,
    _resource: PhantomData<fn() -> T>,
}

impl<T, S, N> ListPage<T, S, N>
where
    T: Resource,
    S: CollectionService<T>,
    N: Notifier,
{
    pub fn new(service: S, notifier: N, permissions: Permissions, page_size: usize) -> Self {
        Self {
            service,
            notifier,
            permissions,
            items: Vec::new(),
            state: ListState::new(page_size),
            _resource: PhantomData,
        }
    }

    /// Fetch the collection. On failure the list is emptied and the error
    /// is reported.
    pub async fn load(&mut self) -> ClientResult<()> {
        match self.service.list().await {
            Ok(items) => {
                tracing::debug!(resource = T::PATH, count = items.len(), "List loaded");
                self.items = items;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(resource = T::PATH, error = %err, "Failed to load list");
                self.items.clear();
                self.notifier.notify(
                    err.to_notice(&format!("Failed to load {}s", T::LABEL.to_lowercase())),
                );
                Err(err)
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.set_search(term);
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state.set_filter(key, value);
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.state.clear_filter(key);
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    /// The rows currently visible.
    pub fn view(&self) -> Page<'_, T> {
        self.state.page(&self.items)
    }

    /// Delete an item on the server, then drop it from the local copy.
    pub async fn remove(&mut self, id: DbId) -> ClientResult<()> {
        if let Err(err) = self.permissions.require_delete() {
            let err = ClientError::from(err);
            self.notifier.notify(err.to_notice("Not allowed"));
            return Err(err);
        }

        match self.service.delete(id).await {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                tracing::info!(resource = T::PATH, id, "Item deleted");
                self.notifier
                    .notify(Notice::success(format!("{} deleted", T::LABEL)));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(resource = T::PATH, id, error = %err, "Delete failed");
                self.notifier.notify(
                    err.to_notice(&format!("Failed to delete {}", T::LABEL.to_lowercase())),
                );
                Err(err)
            }
        }
    }
}

impl<S, N> ListPage<Contact, S, N>
where
    S: ContactService,
    N: Notifier,
{
    /// Set a contact's follow-up flag. Setting it to its current value
    /// succeeds without changing anything.
    pub async fn mark_contacted(&mut self, id: DbId, contacted: bool) -> ClientResult<()> {
        if let Err(err) = self.permissions.require_edit() {
            let err = ClientError::from(err);
            self.notifier.notify(err.to_notice("Not allowed"));
            return Err(err);
        }

        match self.service.set_contacted(id, contacted).await {
            Ok(updated) => {
                if let Some(item) = self.items.iter_mut().find(|c| c.id == id) {
                    *item = updated;
                }
                tracing::info!(contact_id = id, contacted, "Contact follow-up updated");
                let message = if contacted {
                    "Marked as contacted"
                } else {
                    "Marked as not contacted"
                };
                self.notifier.notify(Notice::success(message));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(contact_id = id, error = %err, "Contact update failed");
                self.notifier
                    .notify(err.to_notice("Failed to update contact"));
                Err(err)
            }
        }
    }
}
