//! Test support: tab fixtures and an in-memory [`TabApi`] fake
//!
//! The fake mirrors the platform's move semantics (remove, clamp, insert,
//! reindex) so executor and planner tests observe realistic final orders.

use crate::api::TabApi;
use crate::error::{Error, Result};
use crate::types::{GroupId, Scope, Tab, TabId, WindowId};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

/// Build an unpinned, ungrouped tab in window 1
#[must_use]
pub fn make_tab(id: i64, index: u32, url: &str, title: &str) -> Tab {
    Tab {
        id: TabId(id),
        index,
        window: WindowId(1),
        pinned: false,
        group: None,
        url: url.to_string(),
        title: title.to_string(),
    }
}

/// Stateful in-memory tab list implementing [`TabApi`]
///
/// The window with the smallest id acts as the current window. Moves mutate
/// the list the way the platform would: the tab is removed, the target index
/// clamped to the remaining length, and every index in the window rewritten.
pub struct FakeTabApi {
    windows: Mutex<BTreeMap<WindowId, Vec<Tab>>>,
    failing: Mutex<HashSet<TabId>>,
    move_log: Mutex<Vec<(TabId, u32)>>,
}

impl FakeTabApi {
    /// Seed the fake; tabs are bucketed per window, ordered by index, and
    /// reindexed contiguously
    #[must_use]
    pub fn new(tabs: Vec<Tab>) -> Self {
        let mut windows: BTreeMap<WindowId, Vec<Tab>> = BTreeMap::new();
        for tab in tabs {
            windows.entry(tab.window).or_default().push(tab);
        }
        for window in windows.values_mut() {
            window.sort_by_key(|tab| tab.index);
            reindex(window);
        }
        Self {
            windows: Mutex::new(windows),
            failing: Mutex::new(HashSet::new()),
            move_log: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent single-tab move of `tab` fail
    pub fn fail_moves_of(&self, tab: TabId) {
        self.failing.lock().unwrap().insert(tab);
    }

    /// Current tab order of one window
    #[must_use]
    pub fn order(&self, window: WindowId) -> Vec<TabId> {
        self.windows
            .lock()
            .unwrap()
            .get(&window)
            .map(|tabs| tabs.iter().map(|tab| tab.id).collect())
            .unwrap_or_default()
    }

    /// Every single-tab move issued so far, in order
    #[must_use]
    pub fn move_log(&self) -> Vec<(TabId, u32)> {
        self.move_log.lock().unwrap().clone()
    }

    fn current_window(windows: &BTreeMap<WindowId, Vec<Tab>>) -> Option<WindowId> {
        windows.keys().next().copied()
    }
}

fn reindex(window: &mut [Tab]) {
    for (position, tab) in window.iter_mut().enumerate() {
        tab.index = position as u32;
    }
}

fn remove_tab(window: &mut Vec<Tab>, id: TabId) -> Option<Tab> {
    let position = window.iter().position(|tab| tab.id == id)?;
    Some(window.remove(position))
}

#[async_trait]
impl TabApi for FakeTabApi {
    async fn list_tabs(&self, scope: Scope) -> Result<Vec<Tab>> {
        let windows = self.windows.lock().unwrap();
        match scope {
            Scope::CurrentWindow => {
                let current = Self::current_window(&windows);
                Ok(current
                    .and_then(|id| windows.get(&id))
                    .cloned()
                    .unwrap_or_default())
            }
            Scope::AllWindows => Ok(windows.values().flatten().cloned().collect()),
        }
    }

    async fn move_tab(&self, tab: TabId, index: u32) -> Result<()> {
        if self.failing.lock().unwrap().contains(&tab) {
            return Err(Error::Relay(format!("injected move failure for tab {tab}")));
        }
        let mut windows = self.windows.lock().unwrap();
        let window = windows
            .values_mut()
            .find(|tabs| tabs.iter().any(|t| t.id == tab))
            .ok_or_else(|| Error::Relay(format!("no such tab: {tab}")))?;
        let moved = remove_tab(window, tab).expect("tab located above");
        let slot = (index as usize).min(window.len());
        window.insert(slot, moved);
        reindex(window);
        self.move_log.lock().unwrap().push((tab, index));
        Ok(())
    }

    async fn move_tabs(&self, tabs: &[TabId], index: u32) -> Result<()> {
        let mut windows = self.windows.lock().unwrap();
        let window = windows
            .values_mut()
            .find(|candidates| candidates.iter().any(|t| Some(t.id) == tabs.first().copied()))
            .ok_or_else(|| Error::Relay("no such tabs".to_string()))?;
        let mut block = Vec::with_capacity(tabs.len());
        for &id in tabs {
            if let Some(tab) = remove_tab(window, id) {
                block.push(tab);
            }
        }
        let slot = (index as usize).min(window.len());
        for (offset, tab) in block.into_iter().enumerate() {
            window.insert(slot + offset, tab);
        }
        reindex(window);
        Ok(())
    }

    async fn group_tabs(&self, group: GroupId) -> Result<Vec<Tab>> {
        let windows = self.windows.lock().unwrap();
        let mut members: Vec<Tab> = windows
            .values()
            .flatten()
            .filter(|tab| tab.group == Some(group))
            .cloned()
            .collect();
        members.sort_by_key(|tab| tab.index);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn move_tab_reindexes_the_window() {
        let api = FakeTabApi::new(vec![
            make_tab(1, 0, "https://a.example", "a"),
            make_tab(2, 1, "https://b.example", "b"),
            make_tab(3, 2, "https://c.example", "c"),
        ]);

        api.move_tab(TabId(3), 0).await.unwrap();
        assert_eq!(api.order(WindowId(1)), vec![TabId(3), TabId(1), TabId(2)]);

        let tabs = api.list_tabs(Scope::CurrentWindow).await.unwrap();
        let indices: Vec<u32> = tabs.iter().map(|tab| tab.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn move_tabs_relocates_a_block() {
        let api = FakeTabApi::new(vec![
            make_tab(1, 0, "https://a.example", "a"),
            make_tab(2, 1, "https://b.example", "b"),
            make_tab(3, 2, "https://c.example", "c"),
            make_tab(4, 3, "https://d.example", "d"),
        ]);

        api.move_tabs(&[TabId(3), TabId(4)], 0).await.unwrap();
        assert_eq!(
            api.order(WindowId(1)),
            vec![TabId(3), TabId(4), TabId(1), TabId(2)]
        );
    }

    #[tokio::test]
    async fn injected_failures_do_not_mutate_state() {
        let api = FakeTabApi::new(vec![
            make_tab(1, 0, "https://a.example", "a"),
            make_tab(2, 1, "https://b.example", "b"),
        ]);
        api.fail_moves_of(TabId(2));

        assert!(api.move_tab(TabId(2), 0).await.is_err());
        assert_eq!(api.order(WindowId(1)), vec![TabId(1), TabId(2)]);
    }
}
