use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::invitation::InvitationService};

/// Starts the invitation expiry scheduler
///
/// On every tick of `schedule` the job deletes invitations that expired without an answer
/// and notifies their inviters.
///
/// # Arguments
/// - `db`: Database connection
/// - `schedule`: Six-field cron expression (seconds first)
pub async fn start_scheduler(db: DatabaseConnection, schedule: &str) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = sweep_expired_invitations(&db).await {
                tracing::error!("Error sweeping expired invitations: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Invitation expiry scheduler started ({})", schedule);

    Ok(())
}

async fn sweep_expired_invitations(db: &DatabaseConnection) -> Result<(), AppError> {
    let swept = InvitationService::new(db).sweep_expired(Utc::now()).await?;
    tracing::debug!("Invitation sweep finished, {} removed", swept);

    Ok(())
}
