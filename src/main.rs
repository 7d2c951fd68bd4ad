mod model;
mod server;

use tower_http::trace::TraceLayer;

use crate::server::{
    config::Config, error::AppError, scheduler::invitation_expiry, service::auth::TokenKeys,
    startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    // Start invitation expiry scheduler
    let scheduler_db = db.clone();
    let schedule = config.invitation_sweep_schedule.clone();
    tokio::spawn(async move {
        if let Err(e) = invitation_expiry::start_scheduler(scheduler_db, &schedule).await {
            tracing::error!("Invitation expiry scheduler error: {}", e);
        }
    });

    let app = server::router::router()
        .with_state(AppState::new(db, TokenKeys::from_secret(&config.jwt_secret)))
        .layer(TraceLayer::new_for_http())
        .layer(startup::setup_cors(&config));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
