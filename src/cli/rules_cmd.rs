//! `tabsort rules` - list registered sort rules

use std::sync::Arc;
use tabsort_core::{JsonFileStore, RuleRegistry, SortOrder};

pub async fn run() -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::open_default()?);
    let registry = RuleRegistry::with_defaults(store);

    for rule in registry.list() {
        let order = match rule.default_order() {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        };
        println!("{:<14} {:<16} {}", rule.id().to_string(), rule.label(), order);
    }
    Ok(())
}
