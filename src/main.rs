mod model;
mod server;

use tower_http::trace::TraceLayer;

use crate::server::{config::Config, error::AppError, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = AppState::new(db, config.calendar_filter.strategy());

    let app = server::router::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(startup::cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "Listening on {} with {:?} calendar filter",
        config.bind_addr,
        config.calendar_filter
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    Ok(())
}
