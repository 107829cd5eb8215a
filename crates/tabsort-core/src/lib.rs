//! Tabsort Core - rule-based tab ordering engine
//!
//! This crate implements the sorting side of tabsort:
//! - Rules: per-rule sort-key extraction and the rule registry
//! - Comparator: the tagged sort-key type and its ordering
//! - Planner: minimal-ish move planning against a live tab list
//! - Executor: single-flight orchestration of a whole sort pass
//! - Stores: settings and opened-time persistence
//!
//! The browser itself stays behind the [`api::TabApi`] trait; the relay
//! client in `tabsort-relay` is the production implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod domain;
pub mod error;
pub mod executor;
pub mod key;
pub mod planner;
pub mod rules;
pub mod store;
pub mod testing;
pub mod types;

pub use api::TabApi;
pub use error::{Error, Result};
pub use executor::SortExecutor;
pub use key::SortKey;
pub use planner::{execute_moves, plan_moves, MoveOp};
pub use rules::{DomainRule, LastAccessedRule, OpenedAtRule, RuleRegistry, SortRule};
pub use store::{
    reconcile_opened_at, JsonFileStore, MemoryStore, OpenedAtMap, OpenedAtStore, SettingsStore,
};
pub use types::{
    GroupId, GroupMode, PinMode, RuleId, Scope, Settings, SortOrder, SortResult, Tab, TabId,
    WindowId, SCHEMA_VERSION,
};
