//! Collaborator trait for the live tab/window state
//!
//! The browser owns the tabs; everything here is an asynchronous request
//! against it, and every call can fail independently.

use crate::error::Result;
use crate::types::{GroupId, Scope, Tab, TabId};
use async_trait::async_trait;

/// Asynchronous access to the browser's tab and group state
#[async_trait]
pub trait TabApi: Send + Sync {
    /// Fetch a fresh snapshot of tabs in the given scope, in index order
    async fn list_tabs(&self, scope: Scope) -> Result<Vec<Tab>>;

    /// Move one tab to the given index within its window
    async fn move_tab(&self, tab: TabId, index: u32) -> Result<()>;

    /// Move several tabs to consecutive indices starting at `index`,
    /// preserving the given order
    async fn move_tabs(&self, tabs: &[TabId], index: u32) -> Result<()>;

    /// Fetch the current members of a tab group, in index order
    async fn group_tabs(&self, group: GroupId) -> Result<Vec<Tab>>;

    /// Move a whole group block to `index`, keeping its internal order
    ///
    /// Provided in terms of [`group_tabs`](Self::group_tabs) and
    /// [`move_tabs`](Self::move_tabs); an empty group is a no-op.
    async fn move_group_to_index(&self, group: GroupId, index: u32) -> Result<()> {
        let members = self.group_tabs(group).await?;
        if members.is_empty() {
            return Ok(());
        }
        let ids: Vec<TabId> = members.iter().map(|tab| tab.id).collect();
        self.move_tabs(&ids, index).await
    }
}
