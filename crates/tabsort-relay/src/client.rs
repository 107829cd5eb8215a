//! REST client for the extension relay

use crate::config::RelayConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tabsort_core::{Error, GroupId, Result, Scope, Tab, TabApi, TabId, WindowId};
use tracing::{debug, warn};

/// [`TabApi`] implementation speaking the extension relay protocol
///
/// Endpoints, all JSON over a local HTTP bridge:
/// - `GET  /api/v1/status` - `{ connected }`
/// - `GET  /api/v1/tabs?scope=` - `{ tabs: [...] }`
/// - `POST /api/v1/tabs/move` - `{ tabId, index }`
/// - `POST /api/v1/tabs/move-batch` - `{ tabIds, index }`
/// - `GET  /api/v1/groups/{id}/tabs` - `{ tabs: [...] }`
///
/// A body carrying an `error` field is surfaced as [`Error::Relay`].
pub struct RelayTabApi {
    config: RelayConfig,
    client: reqwest::Client,
}

/// Tab record as the relay serializes it; `groupId` is `-1` or absent for
/// ungrouped tabs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayTab {
    id: i64,
    index: u32,
    window_id: i64,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    group_id: Option<i64>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
}

impl RelayTab {
    fn into_tab(self) -> Tab {
        Tab {
            id: TabId(self.id),
            index: self.index,
            window: WindowId(self.window_id),
            pinned: self.pinned,
            group: self.group_id.filter(|&group| group >= 0).map(GroupId),
            url: self.url,
            title: self.title,
        }
    }
}

fn scope_param(scope: Scope) -> &'static str {
    match scope {
        Scope::CurrentWindow => "currentWindow",
        Scope::AllWindows => "allWindows",
    }
}

/// Reject bodies that carry a relay-side error
fn check_error(body: serde_json::Value) -> Result<serde_json::Value> {
    if let Some(message) = body.get("error").and_then(|value| value.as_str()) {
        return Err(Error::Relay(message.to_string()));
    }
    Ok(body)
}

fn parse_tabs(body: &serde_json::Value) -> Result<Vec<Tab>> {
    let Some(raw) = body.get("tabs") else {
        return Ok(Vec::new());
    };
    let tabs: Vec<RelayTab> = serde_json::from_value(raw.clone())?;
    Ok(tabs.into_iter().map(RelayTab::into_tab).collect())
}

impl RelayTabApi {
    /// Client over the given relay configuration
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| Error::Relay(format!("http client error: {error}")))?;
        Ok(Self { config, client })
    }

    /// Client against the environment-configured relay
    pub fn from_env() -> Result<Self> {
        Self::new(RelayConfig::from_env())
    }

    /// Whether the extension side of the relay is reachable and connected
    pub async fn is_connected(&self) -> bool {
        let url = self.url("/api/v1/status");
        match self.client.get(&url).send().await {
            Ok(response) => match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("connected")
                    .and_then(|value| value.as_bool())
                    .unwrap_or(false),
                Err(error) => {
                    warn!(%error, "relay status response not parseable");
                    false
                }
            },
            Err(error) => {
                debug!(%error, url = %url, "relay status check failed");
                false
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.server_url)
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::Relay(format!("relay request failed: {error}")))?;
        let body = response
            .json()
            .await
            .map_err(|error| Error::Relay(format!("relay response error: {error}")))?;
        check_error(body)
    }

    async fn post_json(&self, path: &str, payload: serde_json::Value) -> Result<serde_json::Value> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|error| Error::Relay(format!("relay request failed: {error}")))?;
        let body = response
            .json()
            .await
            .map_err(|error| Error::Relay(format!("relay response error: {error}")))?;
        check_error(body)
    }
}

#[async_trait]
impl TabApi for RelayTabApi {
    async fn list_tabs(&self, scope: Scope) -> Result<Vec<Tab>> {
        let body = self
            .get_json(&format!("/api/v1/tabs?scope={}", scope_param(scope)))
            .await?;
        let tabs = parse_tabs(&body)?;
        debug!(count = tabs.len(), ?scope, "fetched tab snapshot");
        Ok(tabs)
    }

    async fn move_tab(&self, tab: TabId, index: u32) -> Result<()> {
        self.post_json(
            "/api/v1/tabs/move",
            serde_json::json!({ "tabId": tab, "index": index }),
        )
        .await
        .map(|_| ())
    }

    async fn move_tabs(&self, tabs: &[TabId], index: u32) -> Result<()> {
        self.post_json(
            "/api/v1/tabs/move-batch",
            serde_json::json!({ "tabIds": tabs, "index": index }),
        )
        .await
        .map(|_| ())
    }

    async fn group_tabs(&self, group: GroupId) -> Result<Vec<Tab>> {
        let body = self
            .get_json(&format!("/api/v1/groups/{group}/tabs"))
            .await?;
        parse_tabs(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tab_maps_to_the_core_model() {
        let raw = serde_json::json!({
            "id": 12,
            "index": 3,
            "windowId": 2,
            "pinned": true,
            "groupId": 7,
            "url": "https://example.com",
            "title": "Example"
        });
        let tab: RelayTab = serde_json::from_value(raw).unwrap();
        let tab = tab.into_tab();
        assert_eq!(tab.id, TabId(12));
        assert_eq!(tab.window, WindowId(2));
        assert!(tab.pinned);
        assert_eq!(tab.group, Some(GroupId(7)));
    }

    #[test]
    fn sentinel_group_id_means_ungrouped() {
        let raw = serde_json::json!({ "id": 1, "index": 0, "windowId": 1, "groupId": -1 });
        let tab: RelayTab = serde_json::from_value(raw).unwrap();
        assert_eq!(tab.into_tab().group, None);

        let raw = serde_json::json!({ "id": 2, "index": 1, "windowId": 1 });
        let tab: RelayTab = serde_json::from_value(raw).unwrap();
        assert_eq!(tab.into_tab().group, None);
    }

    #[test]
    fn error_bodies_become_relay_errors() {
        let body = serde_json::json!({ "error": "no window focused" });
        match check_error(body) {
            Err(Error::Relay(message)) => assert_eq!(message, "no window focused"),
            other => unreachable!("expected relay error, got {other:?}"),
        }
    }

    #[test]
    fn tab_lists_parse_from_the_body() {
        let body = serde_json::json!({
            "tabs": [
                { "id": 1, "index": 0, "windowId": 1, "url": "https://a.example" },
                { "id": 2, "index": 1, "windowId": 1 }
            ]
        });
        let tabs = parse_tabs(&body).unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].url, "https://a.example");
        assert_eq!(tabs[1].title, "");
    }

    #[test]
    fn missing_tabs_field_parses_as_empty() {
        let tabs = parse_tabs(&serde_json::json!({})).unwrap();
        assert!(tabs.is_empty());
    }
}
