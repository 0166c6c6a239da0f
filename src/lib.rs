pub mod cache;
pub mod config;
pub mod financials;
pub mod log;
pub mod money;
pub mod providers;
pub mod record;
pub mod summary;
pub mod ui;
pub mod widget;

use crate::record::MatterRecord;
use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Summary,
    Show { record_id: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Matter financials starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    // One run is one refresh: the cache only dedupes record ids within it
    let record_cache = Arc::new(cache::Cache::<String, MatterRecord>::new(Duration::minutes(5)));
    let provider =
        providers::rest_record::RestRecordProvider::new(&config.provider.base_url, record_cache);

    match command {
        AppCommand::Summary => {
            summary::generate_and_display_summaries(
                &config.matters,
                &provider,
                &config.currency_symbol,
            )
            .await
        }
        AppCommand::Show { record_id } => {
            let matter = config::MatterEntry {
                record_id,
                name: None,
            };
            summary::generate_and_display_summaries(
                std::slice::from_ref(&matter),
                &provider,
                &config.currency_symbol,
            )
            .await
        }
    }
}
