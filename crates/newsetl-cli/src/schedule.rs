//! In-process scheduling of the daily run.
//!
//! Without a storage service to deliver creation notifications, the job
//! hands every key it archived straight to the transform.

use std::sync::Arc;

use chrono::Utc;
use newsetl_core::{AppConfig, StorageNotification};
use newsetl_storage::ObjectStore;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::fetch::{self, TargetDay};
use crate::transform;

/// Builds and starts the scheduler with the daily fetch job registered.
///
/// The returned [`JobScheduler`] must be kept alive for as long as jobs
/// should run.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the cron expression is invalid or the
/// scheduler cannot be started.
pub(crate) async fn build_scheduler(
    config: Arc<AppConfig>,
    store: Arc<dyn ObjectStore>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let schedule = config.fetch_schedule.clone();
    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&config);
        let store = Arc::clone(&store);

        Box::pin(async move {
            tracing::info!("scheduler: starting daily fetch");
            if let Err(e) = run_daily(&config, store.as_ref()).await {
                tracing::error!(error = %e, "scheduler: daily run failed");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn run_daily(config: &AppConfig, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let day = TargetDay::Now.resolve(Utc::now().naive_utc()).await?;
    let outcome = fetch::fetch_and_archive(config, store, day).await?;

    for key in &outcome.receipt.keys {
        let notification = StorageNotification::object_created(&config.s3_bucket, key);
        let result = transform::run(config, store, &notification).await?;
        tracing::info!(
            key = %key,
            article_count = result.body.article_count,
            "scheduler: transformed archived object"
        );
    }

    tracing::info!(
        %day,
        status_code = outcome.invocation.status_code,
        "scheduler: daily run complete"
    );
    Ok(())
}
