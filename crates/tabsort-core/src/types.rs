//! Core data model: tab snapshots, user settings, sort results
//!
//! Tabs are owned by the browser; this crate only reads snapshots of them
//! and requests index changes through [`crate::api::TabApi`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current version of the persisted settings layout
pub const SCHEMA_VERSION: u32 = 1;

/// Opaque tab identifier assigned by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Window identifier assigned by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tab-group identifier assigned by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of one browser tab
///
/// `index` is the tab's position within its window at snapshot time; it is
/// not updated when moves are issued later in the same sort pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Browser-assigned tab id
    pub id: TabId,
    /// Position within the owning window
    pub index: u32,
    /// Owning window
    pub window: WindowId,
    /// Pinned flag
    pub pinned: bool,
    /// Tab-group membership, `None` for ungrouped tabs
    #[serde(default)]
    pub group: Option<GroupId>,
    /// Tab URL (may be empty for restricted pages)
    #[serde(default)]
    pub url: String,
    /// Tab title (may be empty while loading)
    #[serde(default)]
    pub title: String,
}

/// Identifier of a registered sort rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    /// Sort by registrable domain, then subdomain, path and title
    Domain,
    /// Sort by the recorded first-observation time
    OpenedAt,
    /// Sort by the recency proxy (current index, newest first)
    LastAccessed,
}

impl RuleId {
    /// Returns the string representation used in settings and on the wire
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::OpenedAt => "openedAt",
            Self::LastAccessed => "lastAccessed",
        }
    }

    /// All known rule ids, in registration order
    #[must_use]
    pub fn all() -> [RuleId; 3] {
        [Self::Domain, Self::OpenedAt, Self::LastAccessed]
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain" => Ok(Self::Domain),
            "openedAt" => Ok(Self::OpenedAt),
            "lastAccessed" => Ok(Self::LastAccessed),
            other => Err(Error::RuleNotFound(other.to_string())),
        }
    }
}

/// Direction applied by the comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Smallest key first
    Asc,
    /// Largest key first
    Desc,
}

impl SortOrder {
    /// The opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// How tab groups participate in a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMode {
    /// Sort each group's tabs in place, keeping group blocks where they are
    SortWithin,
    /// Consolidate group blocks at the head of the partition, untouched inside
    GroupsToHead,
}

/// How pinned tabs participate in a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinMode {
    /// Sort the pinned run like any other partition
    SortPinned,
    /// Leave pinned tabs untouched
    KeepPinned,
}

/// Which windows a sort touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// The focused window only
    CurrentWindow,
    /// Every window, each sorted independently
    AllWindows,
}

/// User preferences, persisted across sessions
///
/// Loaded immutably before each sort. Missing fields deserialize to their
/// defaults so older persisted layouts keep working; [`Settings::migrated`]
/// stamps the current schema version after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Rule used when no explicit rule is given
    pub main_rule: RuleId,
    /// Group handling
    pub group_mode: GroupMode,
    /// Pinned-tab handling
    pub pin_mode: PinMode,
    /// Window scope
    pub scope: Scope,
    /// Global direction toggle; `desc` reverses every rule's default order
    pub sort_order: SortOrder,
    /// Persisted layout version
    pub schema_version: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_rule: RuleId::Domain,
            group_mode: GroupMode::SortWithin,
            pin_mode: PinMode::SortPinned,
            scope: Scope::CurrentWindow,
            sort_order: SortOrder::Asc,
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl Settings {
    /// Stamp the current schema version after loading a persisted record
    #[must_use]
    pub fn migrated(mut self) -> Self {
        self.schema_version = SCHEMA_VERSION;
        self
    }
}

/// Outcome of one sort invocation
///
/// Every failure mode is folded into this structure; `sort_tabs` never
/// returns an error or panics across the trigger surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortResult {
    /// Whether the invocation ran to completion
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// Number of tabs actually moved
    pub moved_tabs: usize,
}

impl SortResult {
    /// A completed sort that moved `moved_tabs` tabs
    #[must_use]
    pub fn sorted(moved_tabs: usize, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            moved_tabs,
        }
    }

    /// A completed sort with nothing to do
    #[must_use]
    pub fn noop() -> Self {
        Self::sorted(0, "no tabs to sort")
    }

    /// Rejection because another sort is already running
    #[must_use]
    pub fn busy() -> Self {
        Self {
            success: false,
            message: "a sort is already running".to_string(),
            moved_tabs: 0,
        }
    }

    /// A failed invocation
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            moved_tabs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_id_round_trips_through_str() {
        for id in RuleId::all() {
            assert_eq!(id.as_str().parse::<RuleId>().unwrap(), id);
        }
        assert!("sortByVibes".parse::<RuleId>().is_err());
    }

    #[test]
    fn settings_serde_uses_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["mainRule"], "domain");
        assert_eq!(json["groupMode"], "sortWithin");
        assert_eq!(json["pinMode"], "sortPinned");
        assert_eq!(json["scope"], "currentWindow");
        assert_eq!(json["sortOrder"], "asc");
        assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
    }

    #[test]
    fn settings_backfill_missing_fields() {
        // A persisted record from an older layout that only knew mainRule.
        let settings: Settings =
            serde_json::from_str(r#"{"mainRule":"lastAccessed","schemaVersion":0}"#).unwrap();
        let settings = settings.migrated();
        assert_eq!(settings.main_rule, RuleId::LastAccessed);
        assert_eq!(settings.group_mode, GroupMode::SortWithin);
        assert_eq!(settings.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn sort_order_reversed() {
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
    }
}
