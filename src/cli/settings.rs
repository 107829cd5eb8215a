//! `tabsort settings` - show or change persisted preferences

use clap::Subcommand;
use serde::de::DeserializeOwned;
use tabsort_core::{JsonFileStore, Settings, SettingsStore};

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the persisted settings as JSON
    Show,
    /// Set one field (mainRule, groupMode, pinMode, scope, sortOrder)
    Set {
        /// Field name, camelCase as in `settings show`
        field: String,
        /// New value
        value: String,
    },
}

pub async fn run(action: SettingsAction) -> anyhow::Result<()> {
    let store = JsonFileStore::open_default()?;
    match action {
        SettingsAction::Show => {
            let settings = store.get_settings().await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set { field, value } => {
            let mut settings = store.get_settings().await?;
            apply(&mut settings, &field, &value)?;
            store.save_settings(&settings).await?;
            println!("{field} = {value}");
        }
    }
    Ok(())
}

fn apply(settings: &mut Settings, field: &str, value: &str) -> anyhow::Result<()> {
    match field {
        "mainRule" => settings.main_rule = parse_variant(field, value)?,
        "groupMode" => settings.group_mode = parse_variant(field, value)?,
        "pinMode" => settings.pin_mode = parse_variant(field, value)?,
        "scope" => settings.scope = parse_variant(field, value)?,
        "sortOrder" => settings.sort_order = parse_variant(field, value)?,
        other => anyhow::bail!("unknown settings field: {other}"),
    }
    Ok(())
}

fn parse_variant<T: DeserializeOwned>(field: &str, value: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| anyhow::anyhow!("invalid value for {field}: {value}"))
}
