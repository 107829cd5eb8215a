//! Sort rules and their registry
//!
//! A rule maps a tab snapshot to a comparable key. Rules are registered once
//! at startup into an explicit [`RuleRegistry`] that is shared by reference;
//! there is no global state and no runtime add/remove.

mod domain_rule;
mod last_accessed;
mod opened_at;

pub use domain_rule::DomainRule;
pub use last_accessed::LastAccessedRule;
pub use opened_at::OpenedAtRule;

use crate::key::SortKey;
use crate::store::OpenedAtStore;
use crate::types::{RuleId, SortOrder, Tab};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A registered sort rule
///
/// `sort_key` is async because some rules consult a store. It must not fail:
/// a rule that cannot resolve its preferred signal falls back to a key built
/// from the snapshot alone.
#[async_trait]
pub trait SortRule: Send + Sync {
    /// Stable identifier
    fn id(&self) -> RuleId;

    /// Human-readable label for menus and CLI output
    fn label(&self) -> &'static str;

    /// Direction this rule sorts in under default settings
    fn default_order(&self) -> SortOrder;

    /// Build the key for one tab
    async fn sort_key(&self, tab: &Tab) -> SortKey;
}

/// Immutable-after-construction registry of sort rules
pub struct RuleRegistry {
    rules: HashMap<RuleId, Arc<dyn SortRule>>,
}

impl RuleRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registry holding the three built-in rules
    #[must_use]
    pub fn with_defaults(opened_at_store: Arc<dyn OpenedAtStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DomainRule));
        registry.register(Arc::new(OpenedAtRule::new(opened_at_store)));
        registry.register(Arc::new(LastAccessedRule));
        registry
    }

    /// Register a rule, replacing any previous rule with the same id
    pub fn register(&mut self, rule: Arc<dyn SortRule>) {
        debug!(rule = %rule.id(), "registering sort rule");
        self.rules.insert(rule.id(), rule);
    }

    /// Look up a rule by id
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<Arc<dyn SortRule>> {
        self.rules.get(&id).cloned()
    }

    /// Whether a rule is registered
    #[must_use]
    pub fn has(&self, id: RuleId) -> bool {
        self.rules.contains_key(&id)
    }

    /// All registered rules, in the canonical id order
    #[must_use]
    pub fn list(&self) -> Vec<Arc<dyn SortRule>> {
        RuleId::all()
            .into_iter()
            .filter_map(|id| self.rules.get(&id).cloned())
            .collect()
    }

    /// Number of registered rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn registry_starts_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.has(RuleId::Domain));
    }

    #[test]
    fn with_defaults_registers_all_three_rules() {
        let registry = RuleRegistry::with_defaults(Arc::new(MemoryStore::new()));
        assert_eq!(registry.len(), 3);
        for id in RuleId::all() {
            assert!(registry.has(id), "missing rule {id}");
        }
    }

    #[test]
    fn list_is_in_canonical_order() {
        let registry = RuleRegistry::with_defaults(Arc::new(MemoryStore::new()));
        let ids: Vec<RuleId> = registry.list().iter().map(|rule| rule.id()).collect();
        assert_eq!(
            ids,
            vec![RuleId::Domain, RuleId::OpenedAt, RuleId::LastAccessed]
        );
    }

    #[test]
    fn get_returns_the_registered_rule() {
        let registry = RuleRegistry::with_defaults(Arc::new(MemoryStore::new()));
        let rule = registry.get(RuleId::LastAccessed).unwrap();
        assert_eq!(rule.id(), RuleId::LastAccessed);
        assert_eq!(rule.default_order(), SortOrder::Desc);
    }
}
