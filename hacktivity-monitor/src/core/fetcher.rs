/*!
Authenticated client for the hacktivity disclosure feed
*/

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::core::config::FeedConfig;
use crate::core::report::{Report, Snapshot};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned {0}")]
    Status(reqwest::StatusCode),
}

/// Wire shape of one feed page: `{"data": [{"attributes": {...}}, ...]}`.
#[derive(Debug, Deserialize)]
struct FeedPage {
    #[serde(default)]
    data: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    attributes: Report,
}

pub struct HacktivityClient {
    config: FeedConfig,
    client: reqwest::Client,
}

impl HacktivityClient {
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    /// Fetch the first page of disclosed reports, keyed by `disclosed_at`.
    ///
    /// Fails soft: a transport error, a non-2xx status, or an undecodable
    /// body is logged and yields an empty snapshot, so downstream a transient
    /// outage looks the same as "no new reports".
    pub async fn fetch(&self) -> Snapshot {
        match self.try_fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error fetching hacktivity data: {e}");
                Snapshot::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Snapshot, FetchError> {
        let url = format!("{}/v1/hackers/hacktivity", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .basic_auth(&self.config.user_name, Some(&self.config.api_token))
            .query(&[
                ("page[size]", self.config.page_size.to_string()),
                ("page[number]", self.config.page_number.to_string()),
                ("queryString", self.config.query.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let page: FeedPage = response.json().await?;
        debug!("Feed returned {} disclosed reports", page.data.len());

        Ok(page
            .data
            .into_iter()
            .map(|item| (item.attributes.disclosed_at.clone(), item.attributes))
            .collect())
    }
}
