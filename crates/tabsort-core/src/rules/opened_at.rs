//! Opened-order rule

use super::SortRule;
use crate::key::SortKey;
use crate::store::OpenedAtStore;
use crate::types::{RuleId, SortOrder, Tab};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Sorts by the recorded first-observation time of each tab
///
/// Tabs without a recorded time (opened before tracking started, or whose
/// record was lost) key on their current index instead, which keeps them
/// where they are relative to each other.
pub struct OpenedAtRule {
    store: Arc<dyn OpenedAtStore>,
}

impl OpenedAtRule {
    /// Rule reading observation times from the given store
    #[must_use]
    pub fn new(store: Arc<dyn OpenedAtStore>) -> Self {
        Self { store }
    }

    fn fallback_key(tab: &Tab) -> SortKey {
        SortKey::seq(vec![SortKey::num(i64::from(tab.index))])
    }
}

#[async_trait]
impl SortRule for OpenedAtRule {
    fn id(&self) -> RuleId {
        RuleId::OpenedAt
    }

    fn label(&self) -> &'static str {
        "By time opened"
    }

    fn default_order(&self) -> SortOrder {
        SortOrder::Asc
    }

    async fn sort_key(&self, tab: &Tab) -> SortKey {
        match self.store.opened_at_map().await {
            Ok(map) => match map.get(&tab.id) {
                Some(&opened_at) => SortKey::seq(vec![SortKey::num(opened_at)]),
                None => Self::fallback_key(tab),
            },
            Err(error) => {
                warn!(tab = %tab.id, %error, "opened-at lookup failed, keying on index");
                Self::fallback_key(tab)
            }
        }
    }
}
