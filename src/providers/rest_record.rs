use anyhow::{Result, anyhow};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::cache::Cache;
use crate::record::{MatterRecord, RecordProvider};

use async_trait::async_trait;

/// Fetches matter records from the record API over HTTP.
pub struct RestRecordProvider {
    base_url: String,
    cache: Arc<Cache<String, MatterRecord>>,
}

impl RestRecordProvider {
    pub fn new(base_url: &str, cache: Arc<Cache<String, MatterRecord>>) -> Self {
        RestRecordProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }
}

#[async_trait]
impl RecordProvider for RestRecordProvider {
    #[instrument(
        name = "MatterRecordFetch",
        skip(self),
        fields(record_id = %record_id)
    )]
    async fn fetch_record(&self, record_id: &str) -> Result<MatterRecord> {
        if let Some(cached) = self.cache.get(&record_id.to_string()).await {
            return Ok(cached);
        }

        let url = format!("{}/api/matters/{}", self.base_url, record_id);
        debug!("Requesting matter record from {}", url);

        let client = reqwest::Client::builder().user_agent("matfin/0.1").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for record: {} URL: {}", e, record_id, url))?;

        debug!(response = ?response, "Received record API response");

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "Record API returned {} for record: {}",
                status,
                record_id
            ));
        }

        let record = response
            .json::<MatterRecord>()
            .await
            .map_err(|e| anyhow!("Malformed record payload for {}: {}", record_id, e))?;

        self.cache.put(record_id.to_string(), record.clone()).await;

        Ok(record)
    }
}
