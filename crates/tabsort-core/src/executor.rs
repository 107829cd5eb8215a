//! Sort orchestration
//!
//! `SortExecutor` owns the whole pass: single-flight admission, snapshot
//! fetch, pin/group partitioning, per-partition key building and ordering,
//! and move execution. Every failure mode folds into the returned
//! [`SortResult`]; nothing escapes to the trigger surface as an error.

use crate::api::TabApi;
use crate::error::Result;
use crate::key::SortKey;
use crate::planner::{execute_moves, plan_moves};
use crate::rules::{RuleRegistry, SortRule};
use crate::types::{
    GroupId, GroupMode, PinMode, RuleId, Scope, Settings, SortOrder, SortResult, Tab, WindowId,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Orchestrates sort passes against the live tab state
///
/// At most one pass runs at a time: a second invocation while one is in
/// flight is rejected immediately with a busy result, with no queueing.
pub struct SortExecutor {
    api: Arc<dyn TabApi>,
    rules: Arc<RuleRegistry>,
    running: AtomicBool,
}

/// Resets the busy flag on every exit path, including early returns
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Direction a rule sorts in under the given settings: the `desc` toggle
/// reverses each rule's own default.
fn effective_order(rule: &dyn SortRule, settings: &Settings) -> SortOrder {
    match settings.sort_order {
        SortOrder::Asc => rule.default_order(),
        SortOrder::Desc => rule.default_order().reversed(),
    }
}

impl SortExecutor {
    /// Executor over the given tab service and rule registry
    #[must_use]
    pub fn new(api: Arc<dyn TabApi>, rules: Arc<RuleRegistry>) -> Self {
        Self {
            api,
            rules,
            running: AtomicBool::new(false),
        }
    }

    /// Run one sort pass with the given rule and settings
    pub async fn sort_tabs(&self, rule_id: RuleId, settings: &Settings) -> SortResult {
        // Single-flight admission: only one pass may hold the flag.
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(rule = %rule_id, "sort already running, rejecting");
            return SortResult::busy();
        }
        let _running = RunningGuard(&self.running);

        let Some(rule) = self.rules.get(rule_id) else {
            return SortResult::failure(format!("sort rule not found: {rule_id}"));
        };
        let order = effective_order(rule.as_ref(), settings);
        info!(rule = %rule_id, ?order, scope = ?settings.scope, "starting sort");

        let outcome = match settings.scope {
            Scope::CurrentWindow => self.sort_current_window(rule.as_ref(), order, settings).await,
            Scope::AllWindows => self.sort_all_windows(rule.as_ref(), order, settings).await,
        };
        match outcome {
            Ok(result) => {
                info!(moved = result.moved_tabs, "sort finished");
                result
            }
            Err(err) => {
                error!(error = %err, "sort failed");
                SortResult::failure(format!("sort failed: {err}"))
            }
        }
    }

    async fn sort_current_window(
        &self,
        rule: &dyn SortRule,
        order: SortOrder,
        settings: &Settings,
    ) -> Result<SortResult> {
        let tabs = self.api.list_tabs(Scope::CurrentWindow).await?;
        if tabs.len() <= 1 {
            return Ok(SortResult::noop());
        }
        let moved = self.sort_window(&tabs, rule, order, settings).await;
        Ok(SortResult::sorted(moved, format!("sorted {moved} tabs")))
    }

    async fn sort_all_windows(
        &self,
        rule: &dyn SortRule,
        order: SortOrder,
        settings: &Settings,
    ) -> Result<SortResult> {
        let tabs = self.api.list_tabs(Scope::AllWindows).await?;
        if tabs.len() <= 1 {
            return Ok(SortResult::noop());
        }

        let mut by_window: BTreeMap<WindowId, Vec<Tab>> = BTreeMap::new();
        for tab in tabs {
            by_window.entry(tab.window).or_default().push(tab);
        }

        let mut total = 0;
        let mut reports = Vec::new();
        for (window, window_tabs) in &by_window {
            if window_tabs.len() <= 1 {
                continue;
            }
            let moved = self.sort_window(window_tabs, rule, order, settings).await;
            total += moved;
            if moved > 0 {
                reports.push(format!("window {window}: {moved} tabs"));
            }
        }

        let message = if reports.is_empty() {
            "no tabs needed moving".to_string()
        } else {
            format!("sorted {total} tabs ({})", reports.join(", "))
        };
        Ok(SortResult::sorted(total, message))
    }

    /// Sort one window: pinned run first (when enabled), then the unpinned
    /// run. Returns tabs moved.
    async fn sort_window(
        &self,
        tabs: &[Tab],
        rule: &dyn SortRule,
        order: SortOrder,
        settings: &Settings,
    ) -> usize {
        let (pinned, unpinned): (Vec<Tab>, Vec<Tab>) =
            tabs.iter().cloned().partition(|tab| tab.pinned);

        let mut moved = 0;
        if settings.pin_mode == PinMode::SortPinned && !pinned.is_empty() {
            moved += self
                .sort_partition(&pinned, rule, order, settings.group_mode)
                .await;
        }
        if !unpinned.is_empty() {
            moved += self
                .sort_partition(&unpinned, rule, order, settings.group_mode)
                .await;
        }
        moved
    }

    async fn sort_partition(
        &self,
        tabs: &[Tab],
        rule: &dyn SortRule,
        order: SortOrder,
        group_mode: GroupMode,
    ) -> usize {
        match group_mode {
            GroupMode::SortWithin => self.sort_within_groups(tabs, rule, order).await,
            GroupMode::GroupsToHead => self.sort_groups_to_head(tabs, rule, order).await,
        }
    }

    /// Sort each group's tabs in place; group blocks stay where they are.
    /// Ungrouped tabs form one bucket of their own.
    async fn sort_within_groups(
        &self,
        tabs: &[Tab],
        rule: &dyn SortRule,
        order: SortOrder,
    ) -> usize {
        let mut buckets: Vec<(Option<GroupId>, Vec<Tab>)> = Vec::new();
        for tab in tabs {
            match buckets.iter_mut().find(|(group, _)| *group == tab.group) {
                Some((_, bucket)) => bucket.push(tab.clone()),
                None => buckets.push((tab.group, vec![tab.clone()])),
            }
        }

        let mut moved = 0;
        for (_, bucket) in &buckets {
            moved += self.sort_run(bucket, rule, order).await;
        }
        moved
    }

    /// Sort ungrouped tabs in place, then consolidate each group block at
    /// the head of the partition in encounter order. Group-internal order is
    /// left untouched.
    async fn sort_groups_to_head(
        &self,
        tabs: &[Tab],
        rule: &dyn SortRule,
        order: SortOrder,
    ) -> usize {
        let ungrouped: Vec<Tab> = tabs
            .iter()
            .filter(|tab| tab.group.is_none())
            .cloned()
            .collect();

        let mut moved = 0;
        if !ungrouped.is_empty() {
            moved += self.sort_run(&ungrouped, rule, order).await;
        }

        let mut groups: Vec<(GroupId, usize)> = Vec::new();
        for tab in tabs {
            if let Some(group) = tab.group {
                match groups.iter_mut().find(|(id, _)| *id == group) {
                    Some((_, members)) => *members += 1,
                    None => groups.push((group, 1)),
                }
            }
        }

        let mut head = tabs.first().map(|tab| tab.index).unwrap_or(0);
        for (group, members) in groups {
            match self.api.move_group_to_index(group, head).await {
                Ok(()) => {
                    moved += members;
                    head += members as u32;
                }
                Err(err) => {
                    warn!(group = %group, error = %err, "group move failed");
                }
            }
        }
        moved
    }

    /// Key, order and move one contiguous bucket of tabs within its own
    /// snapshot index slots.
    async fn sort_run(&self, tabs: &[Tab], rule: &dyn SortRule, order: SortOrder) -> usize {
        if tabs.len() <= 1 {
            return 0;
        }

        let mut keyed: Vec<(Tab, SortKey)> = Vec::with_capacity(tabs.len());
        for tab in tabs {
            let key = rule.sort_key(tab).await;
            keyed.push((tab.clone(), key));
        }
        // Equal keys fall back to the snapshot index: deterministic and
        // stable regardless of the comparison behind the key type.
        keyed.sort_by(|(a, key_a), (b, key_b)| {
            key_a.compare(key_b, order).then_with(|| a.index.cmp(&b.index))
        });
        let target: Vec<Tab> = keyed.into_iter().map(|(tab, _)| tab).collect();

        let moves = plan_moves(tabs, &target);
        if moves.is_empty() {
            debug!("bucket already in order");
            return 0;
        }
        execute_moves(self.api.as_ref(), &moves).await
    }
}
