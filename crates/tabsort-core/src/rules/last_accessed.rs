//! Recency-proxy rule

use super::SortRule;
use crate::key::SortKey;
use crate::types::{RuleId, SortOrder, Tab};
use async_trait::async_trait;

/// Sorts by a recency proxy: the tab's current index, newest-positioned
/// first
///
/// The platform exposes no genuine last-accessed signal across the relay, so
/// position stands in for recency. Descending by default: tabs that sit
/// later in the strip rank first.
pub struct LastAccessedRule;

#[async_trait]
impl SortRule for LastAccessedRule {
    fn id(&self) -> RuleId {
        RuleId::LastAccessed
    }

    fn label(&self) -> &'static str {
        "By recent use"
    }

    fn default_order(&self) -> SortOrder {
        SortOrder::Desc
    }

    async fn sort_key(&self, tab: &Tab) -> SortKey {
        SortKey::seq(vec![SortKey::num(i64::from(tab.index))])
    }
}
