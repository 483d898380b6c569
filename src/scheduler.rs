//! Cron scheduler for the preselection transition

use anyhow::Result;
use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{db::PgContestStore, scoring};

/// Scheduler that periodically advances due contests to video submission
pub struct PreselectionScheduler {
    store: PgContestStore,
    cron_expr: String,
    scheduler: JobScheduler,
}

impl PreselectionScheduler {
    /// Create a new preselection scheduler
    pub async fn new(store: PgContestStore, cron_expr: impl Into<String>) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            store,
            cron_expr: cron_expr.into(),
            scheduler,
        })
    }

    /// Register the preselection job
    pub async fn setup_jobs(&mut self) -> Result<()> {
        let store = self.store.clone();
        let cron_expr = self.cron_expr.clone();

        tracing::info!(cron = %cron_expr, "Adding preselection job");

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let store = store.clone();

            Box::pin(async move {
                tracing::debug!("Running preselection job");

                match scoring::run_preselection(&store, Utc::now(), None).await {
                    Ok(report) if report.contests.is_empty() => {
                        tracing::debug!("No contests due for preselection");
                    }
                    Ok(report) => {
                        tracing::info!(
                            advanced = report.advanced(),
                            failed = report.failed(),
                            "Preselection job finished"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Preselection job failed");
                    }
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        self.scheduler.start().await?;
        Ok(())
    }

    /// Shutdown the scheduler gracefully
    pub async fn shutdown(&mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
