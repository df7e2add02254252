/*!
Single-pass orchestrator: fetch, diff, alert, persist
*/

use tracing::{error, info};

use crate::core::config::MonitorConfig;
use crate::core::differ::diff;
use crate::core::fetcher::HacktivityClient;
use crate::core::notifier::ChatNotifier;
use crate::core::state::StateStore;

/// Counters for one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub new_reports: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct HacktivityMonitor {
    client: HacktivityClient,
    store: StateStore,
    notifier: ChatNotifier,
}

impl HacktivityMonitor {
    pub fn new(config: &MonitorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            client: HacktivityClient::new(config.feed.clone())?,
            store: StateStore::new(&config.state.output_path),
            notifier: ChatNotifier::new(&config.webhook)?,
        })
    }

    /// Run one fetch → diff → alert → persist pass. Alert failures are
    /// per-report and never block the remaining alerts or the final save.
    pub async fn run(&self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        info!("🚀 Starting hacktivity monitor");

        let fresh = self.client.fetch().await;
        info!("Obtained hacktivity data: {} disclosed reports", fresh.len());

        let persisted = self.store.load()?;
        info!("Obtained existing records: {} entries", persisted.len());
        if persisted.is_empty() {
            info!("First run, the full snapshot will be stored");
        }

        let outcome = diff(&fresh, &persisted)?;
        info!("Found {} new disclosures", outcome.new_reports.len());

        let mut summary = RunSummary {
            fetched: fresh.len(),
            new_reports: outcome.new_reports.len(),
            ..RunSummary::default()
        };

        for report in &outcome.new_reports {
            match self.notifier.notify(report).await {
                Ok(()) => summary.delivered += 1,
                Err(e) => {
                    error!("Error sending alert for {:?}: {e}", report.title);
                    summary.failed += 1;
                }
            }
        }

        info!("Storing data");
        self.store.save(&outcome.merged)?;

        info!(
            "🏁 Run complete: {} fetched, {} new, {} delivered, {} failed",
            summary.fetched, summary.new_reports, summary.delivered, summary.failed
        );
        Ok(summary)
    }
}
