//! `tabsort sort` - run one sort pass

use clap::Args;
use std::sync::Arc;
use tabsort_core::{JsonFileStore, RuleId, RuleRegistry, Scope, SettingsStore, SortExecutor};
use tabsort_relay::RelayTabApi;
use tracing::warn;

/// Arguments for a sort pass
#[derive(Args, Debug)]
pub struct SortArgs {
    /// Rule to sort with (domain, openedAt, lastAccessed); defaults to the
    /// configured main rule
    #[arg(long)]
    pub rule: Option<String>,

    /// Sort every window instead of the configured scope
    #[arg(long, conflicts_with = "current_window")]
    pub all_windows: bool,

    /// Sort only the focused window instead of the configured scope
    #[arg(long)]
    pub current_window: bool,
}

pub async fn run(args: SortArgs) -> anyhow::Result<()> {
    let store = Arc::new(JsonFileStore::open_default()?);
    let mut settings = store.get_settings().await?;
    if args.all_windows {
        settings.scope = Scope::AllWindows;
    }
    if args.current_window {
        settings.scope = Scope::CurrentWindow;
    }
    let rule = match &args.rule {
        Some(raw) => raw.parse::<RuleId>()?,
        None => settings.main_rule,
    };

    let api = Arc::new(RelayTabApi::from_env()?);
    if !api.is_connected().await {
        warn!("extension relay reports no connected browser");
    }

    let registry = Arc::new(RuleRegistry::with_defaults(store));
    let executor = SortExecutor::new(api, registry);
    let result = executor.sort_tabs(rule, &settings).await;

    println!("{}", result.message);
    if !result.success {
        anyhow::bail!("sort did not complete");
    }
    Ok(())
}
