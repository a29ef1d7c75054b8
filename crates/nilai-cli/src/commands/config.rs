//! Config command implementation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use nilai_core::StoreUrl;

use crate::cli::StoreArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective store and collection
    Show,

    /// Save the default store location
    SetStore {
        /// file:// URL or directory
        url: String,
    },

    /// Save the default collection
    SetCollection {
        name: String,
    },
}

pub async fn run(cmd: ConfigCommand, store: &StoreArgs) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => {
            let resolved = config::resolve(store)?;
            output::field("Config", &config::config_path()?.display().to_string());
            output::field("Store", resolved.store.as_str());
            output::field("Collection", &resolved.collection);
        }
        ConfigSubcommand::SetStore { url } => {
            let url = StoreUrl::new(&url).context("Invalid store location")?;
            let mut saved = config::load()?;
            saved.store = Some(url.to_string());
            let path = config::save(&saved)?;
            output::success(&format!("Store set to {} ({})", url, path.display()));
        }
        ConfigSubcommand::SetCollection { name } => {
            // Validate by opening a store with the new name.
            let resolved = config::resolve(store)?;
            nilai_file::FileGradeStore::open(resolved.store, name.clone())
                .context("Invalid collection name")?;
            let mut saved = config::load()?;
            saved.collection = Some(name.clone());
            config::save(&saved)?;
            output::success(&format!("Collection set to {}", name));
        }
    }
    Ok(())
}
