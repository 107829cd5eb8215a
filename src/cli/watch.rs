//! `tabsort watch` - poll snapshots to maintain opened-time records
//!
//! The relay does not push tab lifecycle events, so watching is a poll:
//! every interval the full snapshot is reconciled against the stored
//! opened-time map; newly observed tabs are recorded, closed tabs pruned.

use clap::Args;
use std::time::Duration;
use tabsort_core::{reconcile_opened_at, JsonFileStore, Scope, TabApi};
use tabsort_relay::RelayTabApi;
use tracing::{info, warn};

/// Arguments for the watch loop
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Poll interval in seconds
    #[arg(long, default_value_t = 5)]
    pub interval: u64,
}

pub async fn run(args: WatchArgs) -> anyhow::Result<()> {
    let store = JsonFileStore::open_default()?;
    let api = RelayTabApi::from_env()?;

    info!(interval = args.interval, "watching tabs; ctrl-c to stop");
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match api.list_tabs(Scope::AllWindows).await {
                    Ok(snapshot) => match reconcile_opened_at(&store, &snapshot).await {
                        Ok((recorded, removed)) if recorded + removed > 0 => {
                            info!(recorded, removed, "opened-time records updated");
                        }
                        Ok(_) => {}
                        Err(error) => warn!(%error, "opened-time reconcile failed"),
                    },
                    Err(error) => warn!(%error, "tab snapshot failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("stopping watch");
                break;
            }
        }
    }
    Ok(())
}
