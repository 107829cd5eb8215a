//! Domain-order rule

use super::SortRule;
use crate::domain::domain_key;
use crate::key::SortKey;
use crate::types::{RuleId, SortOrder, Tab};
use async_trait::async_trait;

/// Sorts by registrable domain, then subdomain, path and title
pub struct DomainRule;

/// Tabs without a title sort on their URL instead
fn display_title(tab: &Tab) -> &str {
    if tab.title.is_empty() {
        &tab.url
    } else {
        &tab.title
    }
}

#[async_trait]
impl SortRule for DomainRule {
    fn id(&self) -> RuleId {
        RuleId::Domain
    }

    fn label(&self) -> &'static str {
        "By domain"
    }

    fn default_order(&self) -> SortOrder {
        SortOrder::Asc
    }

    async fn sort_key(&self, tab: &Tab) -> SortKey {
        domain_key(&tab.url, display_title(tab))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_tab;

    #[tokio::test]
    async fn key_carries_domain_subdomain_path_title() {
        let tab = make_tab(1, 0, "https://mail.google.com/u/0", "Inbox");
        let key = DomainRule.sort_key(&tab).await;
        let expected = SortKey::seq(vec![
            SortKey::num(crate::domain::REAL_URL_RANK),
            SortKey::text("google.com"),
            SortKey::text("mail"),
            SortKey::text("/u/0"),
            SortKey::text("inbox"),
        ]);
        assert_eq!(key, expected);
    }

    #[tokio::test]
    async fn untitled_tab_sorts_on_its_url() {
        let with_url = make_tab(1, 0, "https://example.com/page", "");
        let key = DomainRule.sort_key(&with_url).await;
        if let SortKey::Seq(parts) = key {
            assert_eq!(parts[4], SortKey::text("https://example.com/page"));
        } else {
            unreachable!("domain key must be a sequence");
        }
    }

    #[tokio::test]
    async fn blank_tab_gets_the_special_rank() {
        let blank = make_tab(2, 1, "", "");
        if let SortKey::Seq(parts) = DomainRule.sort_key(&blank).await {
            assert_eq!(parts[0], SortKey::num(crate::domain::SPECIAL_URL_RANK));
        } else {
            unreachable!("domain key must be a sequence");
        }
    }
}
