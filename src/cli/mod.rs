//! CLI surface
//!
//! Commands:
//! - `sort`: run a sort pass now
//! - `rules`: list registered sort rules
//! - `settings`: show or change persisted preferences
//! - `watch`: keep opened-time records fresh

use clap::{Parser, Subcommand};

pub mod rules_cmd;
pub mod settings;
pub mod sort;
pub mod watch;

/// Sort browser tabs through the extension relay
#[derive(Parser, Debug)]
#[command(name = "tabsort")]
#[command(about = "Sort browser tabs by domain, opened time or recency")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort tabs now
    Sort(sort::SortArgs),
    /// List the registered sort rules
    Rules,
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        action: settings::SettingsAction,
    },
    /// Poll tab snapshots to maintain opened-time records
    Watch(watch::WatchArgs),
}

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Sort(args)) => sort::run(args).await,
        Some(Commands::Rules) => rules_cmd::run().await,
        Some(Commands::Settings { action }) => settings::run(action).await,
        Some(Commands::Watch(args)) => watch::run(args).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
